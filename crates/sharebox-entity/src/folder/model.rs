//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sharebox_core::types::{FolderId, UserId};
use sqlx::FromRow;

/// Maximum folder and file name length, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// A folder in a user's tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name. Siblings may share a name.
    pub name: String,
    /// The folder owner. Never changes after creation.
    pub owner_id: UserId,
    /// Parent folder (None for top-level folders).
    pub parent_id: Option<FolderId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last renamed or moved.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a top-level folder.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Build a new record from creation data.
    pub fn from_create(data: CreateFolder) -> Self {
        let now = Utc::now();
        Self {
            id: FolderId::new(),
            name: data.name,
            owner_id: data.owner_id,
            parent_id: data.parent_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for top-level).
    pub parent_id: Option<FolderId>,
    /// The folder owner.
    pub owner_id: UserId,
}
