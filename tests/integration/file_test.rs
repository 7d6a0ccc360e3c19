//! File upload, download, and management endpoints.

use axum::http::{StatusCode, header};
use serde_json::json;

use sharebox_core::config::StorageBackend;

use crate::helpers::{TestApp, test_config};

#[tokio::test]
async fn test_upload_and_download() {
    let app = TestApp::new().await;
    let (_, token) = app.new_user();
    let docs = app.create_folder(&token, "Docs", None).await;

    let response = app
        .upload(&token, Some(&docs), "report.txt", b"quarterly numbers")
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["name"], "report.txt");
    assert_eq!(response.data()["size_bytes"], 17);
    assert_eq!(response.data()["folder_id"], docs.as_str());
    assert!(response.data().get("storage_key").is_none());
    let id = response.id();

    let raw = app
        .get_raw(&format!("/api/files/{id}/download"), Some(&token))
        .await;
    assert_eq!(raw.status, StatusCode::OK);
    assert_eq!(&raw.body[..], b"quarterly numbers");
    assert_eq!(
        raw.headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("text/plain")
    );
    assert_eq!(
        raw.headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"report.txt\"")
    );
}

#[tokio::test]
async fn test_upload_without_file_part_is_rejected() {
    let app = TestApp::new().await;
    let (_, token) = app.new_user();

    let response = app
        .request("POST", "/api/files", Some(json!({})), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_into_foreign_folder_is_not_found() {
    let app = TestApp::new().await;
    let (_, alice) = app.new_user();
    let (_, bob) = app.new_user();
    let docs = app.create_folder(&alice, "Docs", None).await;

    let response = app.upload(&bob, Some(&docs), "x.txt", b"x").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_move_and_delete_file() {
    let app = TestApp::new().await;
    let (_, token) = app.new_user();
    let docs = app.create_folder(&token, "Docs", None).await;
    let id = app.create_file(&token, None, "a.txt").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{id}"),
            Some(json!({ "name": "b.txt" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "b.txt");

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{id}/move"),
            Some(json!({ "folder_id": docs })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folder_id"], docs.as_str());

    let response = app
        .request("DELETE", &format!("/api/files/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["files_removed"], 1);

    let response = app
        .request("GET", &format!("/api/files/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_by_stranger_is_forbidden() {
    let app = TestApp::new().await;
    let (_, alice) = app.new_user();
    let (_, bob) = app.new_user();
    let id = app.create_file(&alice, None, "secret.txt").await;

    let raw = app
        .get_raw(&format!("/api/files/{id}/download"), Some(&bob))
        .await;
    assert_eq!(raw.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_with_missing_content_reports_storage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("blobs");
    let mut config = test_config();
    config.storage.backend = StorageBackend::Local;
    config.storage.local.root_path = root.to_string_lossy().into_owned();

    let app = TestApp::with_config(config).await;
    let (_, token) = app.new_user();
    let id = app.create_file(&token, None, "a.txt").await;

    std::fs::remove_dir_all(&root).expect("remove blob root");

    let response = app
        .request("DELETE", &format!("/api/files/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.error_code(), "STORAGE_ERROR");

    let response = app
        .request("GET", &format!("/api/files/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
