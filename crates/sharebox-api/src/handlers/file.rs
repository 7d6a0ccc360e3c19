//! File upload, metadata, download, and delete handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use sharebox_core::error::AppError;
use sharebox_core::types::{FileId, FolderId};
use sharebox_entity::file::File;
use sharebox_service::{CascadeReport, UploadFile};

use super::run_to_completion;
use crate::dto::request::{MoveFileRequest, RenameRequest, validated};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files: multipart upload with a `file` part and optional `folder_id`
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<File>>)> {
    let mut folder_id: Option<FolderId> = None;
    let mut upload: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let part = field.name().unwrap_or("").to_string();
        match part.as_str() {
            "folder_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                let text = text.trim();
                if !text.is_empty() {
                    folder_id = Some(
                        text.parse::<FolderId>()
                            .map_err(|_| AppError::validation("Invalid folder_id"))?,
                    );
                }
            }
            "file" => {
                let name = field
                    .file_name()
                    .map(String::from)
                    .ok_or_else(|| AppError::validation("file part needs a filename"))?;
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                upload = Some((name, content_type, data));
            }
            _ => {}
        }
    }

    let (name, content_type, data) =
        upload.ok_or_else(|| AppError::validation("file is required"))?;

    let file = state
        .services
        .tree
        .upload_file(
            &auth,
            UploadFile {
                folder_id,
                name,
                content_type,
                data,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FileId>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let file = state.services.tree.get_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FileId>,
) -> ApiResult<Response> {
    let (file, data) = state.services.tree.download_file(&auth, id).await?;
    attachment(&file, data)
}

/// PUT /api/files/{id}
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FileId>,
    Json(req): Json<RenameRequest>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let req = validated(req)?;
    let file = state.services.tree.rename_file(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}/move
pub async fn move_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FileId>,
    Json(req): Json<MoveFileRequest>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let file = state.services.tree.move_file(&auth, id, req.folder_id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FileId>,
) -> ApiResult<Json<ApiResponse<CascadeReport>>> {
    let cascade = state.services.cascade.clone();
    let ctx = auth.0;
    let report = run_to_completion(async move { cascade.delete_file(&ctx, id).await }).await?;

    // Metadata is already gone at this point.
    if !report.is_clean() {
        return Err(AppError::storage("File removed but its content could not be deleted").into());
    }
    Ok(Json(ApiResponse::ok(report)))
}

/// Build a download response for `file`.
pub(crate) fn attachment(file: &File, data: Bytes) -> ApiResult<Response> {
    let filename: String = file
        .name
        .chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type.as_str())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}
