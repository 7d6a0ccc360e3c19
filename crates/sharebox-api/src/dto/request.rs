//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use sharebox_core::error::AppError;
use sharebox_core::types::{FolderId, UserId};
use sharebox_entity::share::PermissionLevel;
use sharebox_service::GrantRequest;

/// Run field validation, mapping failures to a `Validation` error.
pub fn validated<T: Validate>(req: T) -> Result<T, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;
    Ok(req)
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Parent folder; top level when absent.
    pub parent_id: Option<FolderId>,
}

/// Rename request for files and folders.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// New name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Move folder request. A `name` renames in the same write.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveFolderRequest {
    /// New parent; top level when absent or null.
    pub parent_id: Option<FolderId>,
    /// Optional new name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
}

/// Move file request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFileRequest {
    /// Target folder; top level when absent or null.
    pub folder_id: Option<FolderId>,
}

/// Query parameters for folder listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListChildrenQuery {
    /// Folder to list; top level when absent.
    pub parent_id: Option<FolderId>,
}

/// Create share request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// Grantee for a targeted share.
    pub target_user_id: Option<UserId>,
    /// Level granted; READ when absent.
    #[serde(default)]
    pub permission: Option<PermissionLevel>,
    /// Create a public link instead of a targeted share.
    #[serde(default)]
    pub public: bool,
    /// Expiration.
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<CreateShareRequest> for GrantRequest {
    fn from(req: CreateShareRequest) -> Self {
        GrantRequest {
            target_user_id: req.target_user_id,
            permission: req.permission.unwrap_or(PermissionLevel::Read),
            is_public_link: req.public,
            expires_at: req.expires_at,
        }
    }
}
