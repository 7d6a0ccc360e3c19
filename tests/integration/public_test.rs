//! Anonymous access through public links.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use crate::helpers::TestApp;

async fn public_link(app: &TestApp, token: &str, path: &str, body: serde_json::Value) -> String {
    let response = app.request("POST", path, Some(body), Some(token)).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.data()["public_link"]["token"]
        .as_str()
        .expect("public token")
        .to_string()
}

#[tokio::test]
async fn test_public_file_link() {
    let app = TestApp::new().await;
    let (_, alice) = app.new_user();
    let file = app.create_file(&alice, None, "brochure.txt").await;

    let response = app
        .request(
            "POST",
            &format!("/api/shares/file/{file}"),
            Some(json!({ "public": true })),
            Some(&alice),
        )
        .await;
    let link = &response.data()["public_link"];
    let token = link["token"].as_str().expect("token").to_string();
    assert_eq!(
        link["url"],
        format!("http://sharebox.test/api/public/share/{token}")
    );

    let response = app
        .request("GET", &format!("/api/public/share/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["resource"]["kind"], "file");
    assert_eq!(response.data()["resource"]["resource"]["name"], "brochure.txt");

    let raw = app
        .get_raw(&format!("/api/public/share/{token}/download"), None)
        .await;
    assert_eq!(raw.status, StatusCode::OK);
    assert_eq!(&raw.body[..], b"contents of brochure.txt");
}

#[tokio::test]
async fn test_public_folder_link_shows_metadata_only() {
    let app = TestApp::new().await;
    let (_, alice) = app.new_user();
    let docs = app.create_folder(&alice, "Docs", None).await;
    let token = public_link(
        &app,
        &alice,
        &format!("/api/shares/folder/{docs}"),
        json!({ "public": true }),
    )
    .await;

    let response = app
        .request("GET", &format!("/api/public/share/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["resource"]["kind"], "folder");
    assert_eq!(response.data()["resource"]["resource"]["name"], "Docs");

    let raw = app
        .get_raw(&format!("/api/public/share/{token}/download"), None)
        .await;
    assert_eq!(raw.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_expired_and_unknown_links_are_gone() {
    let app = TestApp::new().await;
    let (_, alice) = app.new_user();
    let file = app.create_file(&alice, None, "old.txt").await;
    let token = public_link(
        &app,
        &alice,
        &format!("/api/shares/file/{file}"),
        json!({ "public": true, "expires_at": Utc::now() - Duration::minutes(5) }),
    )
    .await;

    for path in [
        format!("/api/public/share/{token}"),
        "/api/public/share/definitely-not-a-token".to_string(),
    ] {
        let response = app.request("GET", &path, None, None).await;
        assert_eq!(response.status, StatusCode::GONE);
        assert_eq!(response.error_code(), "LINK_EXPIRED_OR_INVALID");
    }
}

#[tokio::test]
async fn test_link_dies_with_its_file() {
    let app = TestApp::new().await;
    let (_, alice) = app.new_user();
    let docs = app.create_folder(&alice, "Docs", None).await;
    let file = app.create_file(&alice, Some(&docs), "x.txt").await;
    let token = public_link(
        &app,
        &alice,
        &format!("/api/shares/file/{file}"),
        json!({ "public": true }),
    )
    .await;

    let response = app
        .request("DELETE", &format!("/api/folders/{docs}"), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["grants_revoked"], 1);

    let response = app
        .request("GET", &format!("/api/public/share/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::GONE);
}
