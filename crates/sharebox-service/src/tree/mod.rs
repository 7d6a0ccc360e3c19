//! Folder/file hierarchy owned per user.
//!
//! Every folder and file belongs to exactly one owner. Parent links are
//! stored as optional ids and never form a cycle: moves are checked by
//! walking the proposed parent's ancestor chain before anything is written.

mod ancestry;
mod file;
mod folder;

use std::sync::Arc;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::traits::BlobStore;
use sharebox_core::types::{FileId, FolderId};
use sharebox_database::{FileRepository, FolderRepository};
use sharebox_entity::folder::model::MAX_NAME_LEN;
use sharebox_entity::resource::{Resource, ResourceKind, ResourceRef};

use crate::access::AccessResolver;

pub use file::UploadFile;

/// Owns folders and files and the links between them.
pub struct ResourceTree {
    folders: Arc<dyn FolderRepository>,
    files: Arc<dyn FileRepository>,
    blobs: Arc<dyn BlobStore>,
    access: Arc<AccessResolver>,
}

impl std::fmt::Debug for ResourceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceTree")
            .field("blobs", &self.blobs)
            .finish_non_exhaustive()
    }
}

impl ResourceTree {
    /// Creates a new resource tree.
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        files: Arc<dyn FileRepository>,
        blobs: Arc<dyn BlobStore>,
        access: Arc<AccessResolver>,
    ) -> Self {
        Self {
            folders,
            files,
            blobs,
            access,
        }
    }

    /// Load the file or folder behind `reference`, regardless of owner.
    pub async fn resolve(&self, reference: ResourceRef) -> AppResult<Resource> {
        match reference.kind {
            ResourceKind::Folder => self
                .folders
                .find_by_id(FolderId::from_uuid(reference.id))
                .await?
                .map(Resource::Folder)
                .ok_or_else(|| AppError::not_found("Folder not found")),
            ResourceKind::File => self
                .files
                .find_by_id(FileId::from_uuid(reference.id))
                .await?
                .map(Resource::File)
                .ok_or_else(|| AppError::not_found("File not found")),
        }
    }
}

/// Trim `name` and check it is non-blank and at most [`MAX_NAME_LEN`] characters.
pub(crate) fn validate_name(what: &str, name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{what} name cannot be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "{what} name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Folder", "  Docs ").expect("ok"), "Docs");
        assert!(validate_name("Folder", "   ").is_err());
        assert!(validate_name("Folder", &"x".repeat(MAX_NAME_LEN)).is_ok());
        assert!(validate_name("Folder", &"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }
}
