use std::fmt;

use department_core::{Department, DepartmentId, DepartmentPage, RequestId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        request_id: RequestId,
        result: Result<DepartmentPage, FetchError>,
    },
    DeleteCompleted {
        request_id: RequestId,
        result: Result<(), DeleteError>,
    },
    SaveCompleted {
        request_id: RequestId,
        result: Result<Department, SaveError>,
    },
}

/// Payload submitted by the department form. `id: None` creates a new department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DepartmentId>,
    pub name: String,
    pub description: Option<String>,
    pub moderator_login: Option<String>,
}

impl DepartmentDraft {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            moderator_login: None,
        }
    }

    /// Starts an edit of `department`, keeping its id and moderator.
    pub fn edit(department: &Department) -> Self {
        Self {
            id: Some(department.id),
            name: department.name.clone(),
            description: department.description.clone(),
            moderator_login: department.moderator_login.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A failed create, update or delete. `server_message` is whatever the
/// service chose to explain, if anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct MutationError {
    pub kind: FailureKind,
    pub server_message: Option<String>,
}

impl MutationError {
    pub(crate) fn new(kind: FailureKind, server_message: Option<String>) -> Self {
        Self {
            kind,
            server_message,
        }
    }
}

pub type DeleteError = MutationError;
pub type SaveError = MutationError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceSetupError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
