//! Folder endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_and_get_folder() {
    let app = TestApp::new().await;
    let (user, token) = app.new_user();

    let id = app.create_folder(&token, "Docs", None).await;
    let response = app
        .request("GET", &format!("/api/folders/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Docs");
    assert_eq!(response.data()["owner_id"], user.to_string());
    assert!(response.data()["parent_id"].is_null());
}

#[tokio::test]
async fn test_create_folder_validation() {
    let app = TestApp::new().await;
    let (_, token) = app.new_user();

    let response = app
        .request("POST", "/api/folders", Some(json!({ "name": "" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Child", "parent_id": uuid::Uuid::new_v4() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_move_into_descendant_is_conflict() {
    let app = TestApp::new().await;
    let (_, token) = app.new_user();
    let docs = app.create_folder(&token, "Docs", None).await;
    let year = app.create_folder(&token, "2024", Some(&docs)).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{docs}/move"),
            Some(json!({ "parent_id": year })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "CYCLE_DETECTED");

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{year}/move"),
            Some(json!({ "parent_id": null, "name": "Archive" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Archive");
    assert!(response.data()["parent_id"].is_null());
}

#[tokio::test]
async fn test_rename_and_breadcrumbs() {
    let app = TestApp::new().await;
    let (_, token) = app.new_user();
    let docs = app.create_folder(&token, "Docs", None).await;
    let year = app.create_folder(&token, "2024", Some(&docs)).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{docs}"),
            Some(json!({ "name": "Documents" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/folders/{year}/breadcrumbs"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Documents", "2024"]);
}

#[tokio::test]
async fn test_list_children_by_parent() {
    let app = TestApp::new().await;
    let (_, token) = app.new_user();
    let docs = app.create_folder(&token, "Docs", None).await;
    app.create_folder(&token, "2024", Some(&docs)).await;
    app.create_file(&token, Some(&docs), "notes.txt").await;

    let response = app
        .request("GET", &format!("/api/folders?parent_id={docs}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folders"].as_array().map(Vec::len), Some(1));
    assert_eq!(response.data()["files"][0]["name"], "notes.txt");
}

#[tokio::test]
async fn test_other_users_folder_is_hidden() {
    let app = TestApp::new().await;
    let (_, alice) = app.new_user();
    let (_, bob) = app.new_user();
    let docs = app.create_folder(&alice, "Docs", None).await;

    let response = app
        .request("GET", &format!("/api/folders/{docs}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/api/folders/{docs}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_folder_reports_cascade() {
    let app = TestApp::new().await;
    let (_, token) = app.new_user();
    let docs = app.create_folder(&token, "Docs", None).await;
    let year = app.create_folder(&token, "2024", Some(&docs)).await;
    let file = app.create_file(&token, Some(&year), "X.pdf").await;

    let response = app
        .request("DELETE", &format!("/api/folders/{docs}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folders_removed"], 2);
    assert_eq!(response.data()["files_removed"], 1);
    assert_eq!(response.data()["unremoved_blobs"], json!([]));

    let response = app
        .request("GET", &format!("/api/files/{file}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
