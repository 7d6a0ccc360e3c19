//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sharebox_core::types::{FileId, FolderId, UserId};
use sqlx::FromRow;

/// A stored file's metadata. The bytes live in the blob store under `storage_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// Key returned by the blob store when the content was written.
    #[serde(skip_serializing, default)]
    pub storage_key: String,
    /// Original display name supplied at upload.
    pub name: String,
    /// MIME type reported by the uploader.
    pub content_type: String,
    /// Content length in bytes.
    pub size_bytes: i64,
    /// The file owner.
    pub owner_id: UserId,
    /// Containing folder (None for top-level files).
    pub folder_id: Option<FolderId>,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the file was last renamed or moved.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }

    /// Build a new record from creation data.
    pub fn from_create(data: CreateFile) -> Self {
        let now = Utc::now();
        Self {
            id: FileId::new(),
            storage_key: data.storage_key,
            name: data.name,
            content_type: data.content_type,
            size_bytes: data.size_bytes,
            owner_id: data.owner_id,
            folder_id: data.folder_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Blob store key for the content.
    pub storage_key: String,
    /// Display name.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// Content length in bytes.
    pub size_bytes: i64,
    /// The file owner.
    pub owner_id: UserId,
    /// Containing folder.
    pub folder_id: Option<FolderId>,
}
