//! Share management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use sharebox_core::types::GrantId;
use sharebox_entity::resource::{ResourceKind, ResourceRef};
use sharebox_service::ShareView;

use crate::dto::request::CreateShareRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/shares/{kind}/{id}
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
    Json(req): Json<CreateShareRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ShareView>>)> {
    let resource = resource_ref(&kind, id)?;
    let share = state
        .services
        .shares
        .share_resource(&auth, resource, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(share))))
}

/// GET /api/shares/{kind}/{id}
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
) -> ApiResult<Json<ApiResponse<Vec<ShareView>>>> {
    let resource = resource_ref(&kind, id)?;
    let shares = state.services.shares.list_shares(&auth, resource).await?;
    Ok(Json(ApiResponse::ok(shares)))
}

/// GET /api/shares/shared-with-me
pub async fn shared_with_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<ShareView>>>> {
    let shares = state.services.shares.shared_with_me(&auth).await?;
    Ok(Json(ApiResponse::ok(shares)))
}

/// DELETE /api/shares/grants/{grant_id}
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(grant_id): Path<GrantId>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.services.shares.revoke_share(&auth, grant_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Share revoked"))))
}

fn resource_ref(kind: &str, id: Uuid) -> ApiResult<ResourceRef> {
    let kind: ResourceKind = kind.parse()?;
    Ok(ResourceRef { id, kind })
}
