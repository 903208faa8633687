use std::time::Duration;

use department_core::{
    Department, DepartmentFilter, DepartmentId, DepartmentPage, Pagination,
};
use department_logging::dept_debug;
use serde::Deserialize;
use url::Url;

use crate::{
    DeleteError, DepartmentDraft, FailureKind, FetchError, MutationError, SaveError,
    ServiceSetupError,
};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Root of the REST API; departments live under `{base_url}/departments`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub auth_token: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            auth_token: None,
        }
    }
}

/// Remote department store. Authorization is enforced behind this trait,
/// whatever the client decided to show.
#[async_trait::async_trait]
pub trait DepartmentService: Send + Sync {
    async fn list(
        &self,
        filter: &DepartmentFilter,
        pagination: Pagination,
    ) -> Result<DepartmentPage, FetchError>;

    async fn remove(&self, id: DepartmentId) -> Result<(), DeleteError>;

    async fn save(&self, draft: &DepartmentDraft) -> Result<Department, SaveError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDepartmentService {
    base_url: Url,
    auth_token: Option<String>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ReqwestDepartmentService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceSetupError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ServiceSetupError::InvalidBaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceSetupError::InvalidBaseUrl(settings.base_url));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            base_url,
            auth_token: settings.auth_token,
            client,
        })
    }

    fn endpoint(&self, id: Option<DepartmentId>) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: base urls that cannot carry a path are rejected in `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("departments");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl DepartmentService for ReqwestDepartmentService {
    async fn list(
        &self,
        filter: &DepartmentFilter,
        pagination: Pagination,
    ) -> Result<DepartmentPage, FetchError> {
        let mut url = self.endpoint(None);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &pagination.page.to_string());
            query.append_pair("size", &pagination.size.to_string());
            if let Some(name) = &filter.name {
                query.append_pair("name", name);
            }
        }
        dept_debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|err| FetchError::new(classify(&err), err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = server_message(&body).unwrap_or_else(|| status.to_string());
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::new(classify(&err), err.to_string()))?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }

    async fn remove(&self, id: DepartmentId) -> Result<(), DeleteError> {
        let url = self.endpoint(Some(id));
        dept_debug!("DELETE {}", url);

        let response = self
            .authorize(self.client.delete(url))
            .send()
            .await
            .map_err(|err| MutationError::new(classify(&err), None))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(MutationError::new(
            FailureKind::HttpStatus(status.as_u16()),
            server_message(&body),
        ))
    }

    async fn save(&self, draft: &DepartmentDraft) -> Result<Department, SaveError> {
        let request = match draft.id {
            Some(id) => self.client.put(self.endpoint(Some(id))),
            None => self.client.post(self.endpoint(None)),
        };
        let body = serde_json::to_vec(draft)
            .map_err(|err| MutationError::new(FailureKind::Decode, Some(err.to_string())))?;

        let response = self
            .authorize(request)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| MutationError::new(classify(&err), None))?;

        let status = response.status();
        let body = response.bytes().await.unwrap_or_default();
        if !status.is_success() {
            return Err(MutationError::new(
                FailureKind::HttpStatus(status.as_u16()),
                server_message(&body),
            ));
        }
        serde_json::from_slice(&body)
            .map_err(|err| MutationError::new(FailureKind::Decode, Some(err.to_string())))
    }
}

fn server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}

fn classify(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_builder() {
        FailureKind::InvalidUrl
    } else {
        FailureKind::Network
    }
}
