//! Shared fixtures for the wiremock-backed integration tests.

#![allow(dead_code)]

use admin_client::{AdminApp, Config};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// App pointed at `server` with transient retries disabled, so call counts
/// seen by the mock server are exact.
pub fn test_app(server: &MockServer) -> AdminApp {
    AdminApp::new(Config::with_api_base(server.uri()).max_retries(0)).expect("app")
}

pub fn token_body(token: &str) -> serde_json::Value {
    json!({ "accessToken": token })
}

pub fn reference_client(id: &str, name: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{id}@example.com"),
        "projectType": "landing",
        "isActive": true
    })
}

/// Refresh endpoint answering with `token`, expected exactly `times` times.
pub async fn mount_refresh(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/admin/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(token)))
        .expect(times)
        .mount(server)
        .await;
}

/// Refresh endpoint rejecting the session, expected exactly `times` times.
pub async fn mount_refresh_denied(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/admin/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "No session" })))
        .expect(times)
        .mount(server)
        .await;
}

/// `GET {route}` answering 401 for `Bearer {token}`.
pub async fn mount_unauthorized_for(server: &MockServer, route: &str, token: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "jwt expired" })))
        .expect(times)
        .mount(server)
        .await;
}

/// `GET {route}` answering 200 with `body` for `Bearer {token}`.
pub async fn mount_ok_for(
    server: &MockServer,
    route: &str,
    token: &str,
    body: serde_json::Value,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}
