use std::time::Duration;

use department_core::{Department, DepartmentFilter, DepartmentPage, Pagination};
use department_engine::{
    DepartmentDraft, DepartmentService, FailureKind, ReqwestDepartmentService, ServiceSettings,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ReqwestDepartmentService {
    ReqwestDepartmentService::new(ServiceSettings {
        base_url: format!("{}/api", server.uri()),
        ..ServiceSettings::default()
    })
    .expect("service")
}

#[tokio::test]
async fn list_sends_zero_based_paging_and_name_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/departments"))
        .and(query_param("page", "0"))
        .and(query_param("size", "12"))
        .and(query_param("name", "Engineering"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "queryResult": [{"id": 1, "name": "Engineering", "moderatorLogin": "alice"}],
            "pageCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let filter = DepartmentFilter {
        name: Some("Engineering".to_string()),
    };
    let page = service
        .list(&filter, Pagination { page: 0, size: 12 })
        .await
        .expect("list ok");

    assert_eq!(
        page,
        DepartmentPage::new(
            vec![Department::new(1, "Engineering").with_moderator("alice")],
            1
        )
    );
}

#[tokio::test]
async fn list_without_filter_omits_name_and_tolerates_missing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let page = service
        .list(&DepartmentFilter::default(), Pagination { page: 2, size: 12 })
        .await
        .expect("list ok");
    assert_eq!(page, DepartmentPage::default());

    let requests = server.received_requests().await.expect("recorded");
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("page=2"));
    assert!(!query.contains("name="));
}

#[tokio::test]
async fn list_reports_http_status_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/departments"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "maintenance window"})),
        )
        .mount(&server)
        .await;

    let err = service_for(&server)
        .list(&DepartmentFilter::default(), Pagination { page: 0, size: 12 })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.message, "maintenance window");
}

#[tokio::test]
async fn list_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .list(&DepartmentFilter::default(), Pagination { page: 0, size: 12 })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn list_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/departments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let service = ReqwestDepartmentService::new(ServiceSettings {
        base_url: format!("{}/api", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..ServiceSettings::default()
    })
    .expect("service");

    let err = service
        .list(&DepartmentFilter::default(), Pagination { page: 0, size: 12 })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn remove_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/departments/7"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = ReqwestDepartmentService::new(ServiceSettings {
        base_url: format!("{}/api/", server.uri()),
        auth_token: Some("secret".to_string()),
        ..ServiceSettings::default()
    })
    .expect("service");

    service.remove(7).await.expect("delete ok");
}

#[tokio::test]
async fn remove_failure_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/departments/7"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "in use"})))
        .mount(&server)
        .await;

    let err = service_for(&server).remove(7).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(409));
    assert_eq!(err.server_message.as_deref(), Some("in use"));
}

#[tokio::test]
async fn remove_failure_without_body_has_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/departments/7"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = service_for(&server).remove(7).await.unwrap_err();
    assert_eq!(err.server_message, None);
}

#[tokio::test]
async fn save_posts_new_and_puts_existing_departments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/departments"))
        .and(body_json(json!({
            "name": "Research",
            "description": null,
            "moderatorLogin": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 12, "name": "Research"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/departments/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "name": "Research & Development"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let created = service
        .save(&DepartmentDraft::create("Research"))
        .await
        .expect("create ok");
    assert_eq!(created, Department::new(12, "Research"));

    let mut draft = DepartmentDraft::edit(&created);
    draft.name = "Research & Development".to_string();
    let updated = service.save(&draft).await.expect("update ok");
    assert_eq!(updated.name, "Research & Development");
}

#[test]
fn rejects_unusable_base_url() {
    let result = ReqwestDepartmentService::new(ServiceSettings {
        base_url: "mailto:someone@example.com".to_string(),
        ..ServiceSettings::default()
    });
    assert!(result.is_err());
}
