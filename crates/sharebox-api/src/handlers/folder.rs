//! Folder CRUD and tree handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use sharebox_core::types::FolderId;
use sharebox_entity::folder::{Folder, FolderContents};
use sharebox_service::CascadeReport;

use super::run_to_completion;
use crate::dto::request::{
    CreateFolderRequest, ListChildrenQuery, MoveFolderRequest, RenameRequest, validated,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/folders?parent_id=...
pub async fn list_children(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListChildrenQuery>,
) -> ApiResult<Json<ApiResponse<FolderContents>>> {
    let contents = state
        .services
        .tree
        .list_children(&auth, query.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(contents)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Folder>>)> {
    let req = validated(req)?;
    let folder = state
        .services
        .tree
        .create_folder(&auth, &req.name, req.parent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.services.tree.get_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
    Json(req): Json<RenameRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let req = validated(req)?;
    let folder = state.services.tree.rename_folder(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
    Json(req): Json<MoveFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let req = validated(req)?;
    let tree = &state.services.tree;
    let folder = match req.name {
        Some(name) => tree.update_folder(&auth, id, &name, req.parent_id).await?,
        None => tree.move_folder(&auth, id, req.parent_id).await?,
    };
    Ok(Json(ApiResponse::ok(folder)))
}

/// GET /api/folders/{id}/breadcrumbs
pub async fn breadcrumbs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> ApiResult<Json<ApiResponse<Vec<Folder>>>> {
    let chain = state.services.tree.breadcrumbs(&auth, id).await?;
    Ok(Json(ApiResponse::ok(chain)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> ApiResult<Json<ApiResponse<CascadeReport>>> {
    let cascade = state.services.cascade.clone();
    let ctx = auth.0;
    let report = run_to_completion(async move { cascade.delete_folder(&ctx, id).await }).await?;
    Ok(Json(ApiResponse::ok(report)))
}
