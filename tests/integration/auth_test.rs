//! Bearer authentication on protected routes.

use axum::http::StatusCode;
use chrono::Duration;

use sharebox_auth::JwtEncoder;
use sharebox_core::types::UserId;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/folders", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/api/folders", None, Some("not.a.jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new().await;
    let mut other = app.config.auth.clone();
    other.jwt_secret = "a-completely-different-secret".to_string();
    let forged = JwtEncoder::new(&other)
        .issue(UserId::new())
        .expect("issue")
        .token;

    let response = app.request("GET", "/api/folders", None, Some(&forged)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new().await;
    let expired = JwtEncoder::new(&app.config.auth)
        .issue_with_ttl(UserId::new(), Duration::minutes(-10))
        .expect("issue")
        .token;

    let response = app.request("GET", "/api/folders", None, Some(&expired)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_lists_empty_top_level() {
    let app = TestApp::new().await;
    let (_, token) = app.new_user();
    let response = app.request("GET", "/api/folders", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["folders"], serde_json::json!([]));
    assert_eq!(response.data()["files"], serde_json::json!([]));
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["storage_backend"], "memory");
}
