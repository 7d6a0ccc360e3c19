//! Anonymous access through public share links.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use chrono::Utc;

use sharebox_service::PublicShare;

use super::file::attachment;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/public/share/{token}
pub async fn open_share(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<ApiResponse<PublicShare>>> {
    let share = state
        .services
        .shares
        .open_public_link(&token, Utc::now())
        .await?;
    Ok(Json(ApiResponse::ok(share)))
}

/// GET /api/public/share/{token}/download
pub async fn download_share(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Response> {
    let (file, data) = state
        .services
        .shares
        .download_public_file(&token, Utc::now())
        .await?;
    attachment(&file, data)
}
