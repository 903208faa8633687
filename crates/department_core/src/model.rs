use serde::{Deserialize, Serialize};

/// Logical time in milliseconds. Supplied by the driver through `Msg::Tick`.
pub type Millis = u64;

/// Identifier attached to every outgoing request so late responses can be matched or dropped.
pub type RequestId = u64;

pub type DepartmentId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub moderator_login: Option<String>,
}

impl Department {
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            moderator_login: None,
        }
    }

    pub fn with_moderator(mut self, login: impl Into<String>) -> Self {
        self.moderator_login = Some(login.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Moderator,
    Member,
}

/// The signed-in user as reported by the authentication context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

/// Listing filter. `name: None` means no filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepartmentFilter {
    pub name: Option<String>,
}

/// Zero-based paging as understood by the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
}

/// One page of listing results. Both fields may be absent in a response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPage {
    #[serde(default)]
    pub query_result: Option<Vec<Department>>,
    #[serde(default)]
    pub page_count: Option<u32>,
}

impl DepartmentPage {
    pub fn new(query_result: Vec<Department>, page_count: u32) -> Self {
        Self {
            query_result: Some(query_result),
            page_count: Some(page_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A failed delete. The service may or may not explain why.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteFailure {
    pub message: Option<String>,
}

impl DeleteFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}
