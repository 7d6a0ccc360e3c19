//! Share management endpoints.

use axum::http::StatusCode;
use serde_json::json;

use sharebox_core::config::AppConfig;

use crate::helpers::{TestApp, test_config};

#[tokio::test]
async fn test_share_file_with_user() {
    let app = TestApp::new().await;
    let (_, alice) = app.new_user();
    let (bob_id, bob) = app.new_user();
    let file = app.create_file(&alice, None, "plan.txt").await;

    let response = app
        .request(
            "POST",
            &format!("/api/shares/file/{file}"),
            Some(json!({ "target_user_id": bob_id, "permission": "READ" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["resource_name"], "plan.txt");
    assert_eq!(response.data()["permission"], "READ");
    assert_eq!(response.data()["is_public"], false);
    assert!(response.data()["public_link"].is_null());

    let raw = app
        .get_raw(&format!("/api/files/{file}/download"), Some(&bob))
        .await;
    assert_eq!(raw.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/shares/shared-with-me", None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()[0]["resource_name"], "plan.txt");
    assert_eq!(response.data()[0]["resource_kind"], "file");
}

#[tokio::test]
async fn test_share_by_non_owner_is_not_found() {
    let app = TestApp::new().await;
    let (_, alice) = app.new_user();
    let (_, bob) = app.new_user();
    let docs = app.create_folder(&alice, "Docs", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/shares/folders/{docs}"),
            Some(json!({ "public": true })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_share_requests() {
    let app = TestApp::new().await;
    let (alice_id, alice) = app.new_user();
    let (bob_id, _) = app.new_user();
    let docs = app.create_folder(&alice, "Docs", None).await;

    let cases = [
        ("folder", json!({ "public": true, "target_user_id": bob_id })),
        ("folder", json!({ "public": false })),
        ("folder", json!({ "target_user_id": alice_id })),
        ("drive", json!({ "public": true })),
    ];
    for (kind, body) in cases {
        let response = app
            .request("POST", &format!("/api/shares/{kind}/{docs}"), Some(body.clone()), Some(&alice))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{kind} {body}");
    }
}

#[tokio::test]
async fn test_list_and_revoke_shares() {
    let app = TestApp::new().await;
    let (_, alice) = app.new_user();
    let (bob_id, bob) = app.new_user();
    let docs = app.create_folder(&alice, "Docs", None).await;

    let share = app
        .request(
            "POST",
            &format!("/api/shares/folder/{docs}"),
            Some(json!({ "target_user_id": bob_id })),
            Some(&alice),
        )
        .await
        .id();

    let response = app
        .request("GET", &format!("/api/shares/folder/{docs}"), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data().as_array().map(Vec::len), Some(1));

    let response = app
        .request("DELETE", &format!("/api/shares/grants/{share}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", &format!("/api/shares/grants/{share}"), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/folders/{docs}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_edit_grant_renames_when_levels_enforced() {
    let mut config: AppConfig = test_config();
    config.sharing.enforce_permission_levels = true;
    let app = TestApp::with_config(config).await;
    let (_, alice) = app.new_user();
    let (reader_id, reader) = app.new_user();
    let (editor_id, editor) = app.new_user();
    let file = app.create_file(&alice, None, "draft.txt").await;

    for (user, level) in [(reader_id, "READ"), (editor_id, "EDIT")] {
        let response = app
            .request(
                "POST",
                &format!("/api/shares/file/{file}"),
                Some(json!({ "target_user_id": user, "permission": level })),
                Some(&alice),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let rename = |name: &str| Some(json!({ "name": name }));
    let response = app
        .request("PUT", &format!("/api/files/{file}"), rename("r.txt"), Some(&reader))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("PUT", &format!("/api/files/{file}"), rename("final.txt"), Some(&editor))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "final.txt");
}
