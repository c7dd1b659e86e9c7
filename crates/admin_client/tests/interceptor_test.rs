//! Integration tests for bearer injection and refresh-and-retry on 401

mod common;

use admin_client::api::ApiRequest;
use admin_client::{AdminApi, AuthStatus};
use common::{
    mount_ok_for, mount_refresh, mount_refresh_denied, mount_unauthorized_for, reference_client,
    test_app,
};
use serde_json::json;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CLIENTS: &str = "/admin/reference-clients";

/// Without a held token no Authorization header is sent
#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let mock_server = MockServer::start().await;

    // Registered first: would win if the header were present
    Mock::given(method("GET"))
        .and(path("/admin/projects"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server);
    assert!(app.tokens().get().is_none());

    let projects = app.api().list_projects().await.expect("list");
    assert!(projects.is_empty());
}

/// A held token is attached as a bearer header
#[tokio::test]
async fn test_bearer_header_attached_when_token_held() {
    let mock_server = MockServer::start().await;
    mount_ok_for(&mock_server, CLIENTS, "abc", json!([]), 1).await;

    let app = test_app(&mock_server);
    app.session().set_authed("abc");

    let clients = app.api().list_reference_clients().await.expect("list");
    assert!(clients.is_empty());
}

/// Expired token -> 401 -> refresh -> retry with the new token, transparently
#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_retried() {
    let mock_server = MockServer::start().await;
    mount_unauthorized_for(&mock_server, CLIENTS, "expired", 1).await;
    mount_refresh(&mock_server, "new123", 1).await;
    mount_ok_for(
        &mock_server,
        CLIENTS,
        "new123",
        json!([reference_client("1", "Dana")]),
        1,
    )
    .await;

    let app = test_app(&mock_server);
    app.session().set_authed("expired");

    let clients = app.api().list_reference_clients().await.expect("retried call succeeds");

    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Dana");
    assert_eq!(app.tokens().get().as_deref(), Some("new123"));
    assert_eq!(app.session().status(), AuthStatus::Authed);
}

/// K concurrent 401s share exactly one refresh call and all resume with its token
#[tokio::test]
async fn test_concurrent_unauthorized_requests_share_one_refresh() {
    const K: u64 = 5;
    let mock_server = MockServer::start().await;
    mount_unauthorized_for(&mock_server, CLIENTS, "expired", K).await;
    Mock::given(method("POST"))
        .and(path("/admin/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(300))
                .set_body_json(common::token_body("new123")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_ok_for(&mock_server, CLIENTS, "new123", json!([]), K).await;

    let app = test_app(&mock_server);
    app.session().set_authed("expired");

    let calls = (0..K).map(|_| {
        let api = app.api().clone();
        async move { api.list_reference_clients().await }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|result| result.is_ok()), "{results:?}");
    assert_eq!(app.tokens().get().as_deref(), Some("new123"));
    assert!(!app.refresher().is_refreshing().await);
}

/// A request that 401s again after its single retry fails without a second refresh
#[tokio::test]
async fn test_no_second_refresh_after_retry_fails() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CLIENTS))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "forbidden" })))
        .expect(2)
        .mount(&mock_server)
        .await;
    mount_refresh(&mock_server, "new123", 1).await;

    let app = test_app(&mock_server);
    app.session().set_authed("expired");

    let err = app
        .api()
        .list_reference_clients()
        .await
        .expect_err("second 401 must surface");
    assert!(err.is_unauthorized());
    assert_eq!(err.server_message(), Some("forbidden"));
}

/// A denied refresh clears the token, drops to guest and surfaces the original 401
#[tokio::test]
async fn test_denied_refresh_clears_token_and_propagates_original_error() {
    let mock_server = MockServer::start().await;
    mount_unauthorized_for(&mock_server, CLIENTS, "expired", 1).await;
    mount_refresh_denied(&mock_server, 1).await;

    let app = test_app(&mock_server);
    app.session().set_authed("expired");

    let err = app
        .api()
        .list_reference_clients()
        .await
        .expect_err("original 401 propagates");

    assert!(err.is_unauthorized());
    assert_eq!(err.server_message(), Some("jwt expired"));
    assert_eq!(app.tokens().get(), None);
    assert_eq!(app.session().status(), AuthStatus::Guest);
}

/// A 401 from an auth endpoint never triggers the refresh path
#[tokio::test]
async fn test_auth_endpoint_401_is_not_intercepted() {
    let mock_server = MockServer::start().await;
    mount_refresh_denied(&mock_server, 1).await;

    let app = test_app(&mock_server);
    app.session().set_authed("expired");

    let err = app
        .api()
        .send(ApiRequest::post("/admin/auth/refresh"))
        .await
        .expect_err("refresh 401 fails straight through");

    assert!(err.is_unauthorized());
    // Pass-through leaves the session alone
    assert_eq!(app.tokens().get().as_deref(), Some("expired"));
}

/// Non-401 failures are not intercepted either
#[tokio::test]
async fn test_server_error_propagates_without_refresh() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/projects/p1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_refresh(&mock_server, "never", 0).await;

    let app = test_app(&mock_server);
    app.session().set_authed("abc");

    let err = app.api().delete_project("p1").await.expect_err("500 surfaces");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert_eq!(err.server_message(), Some("database unavailable"));
}
