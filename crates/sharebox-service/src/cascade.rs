//! Multi-entity deletion.
//!
//! Deleting a folder removes its whole subtree: every descendant folder,
//! every file inside them, every grant on any of those, and the stored file
//! contents. Metadata is always removed before the blob it points at, so a
//! failure can leave an orphaned blob but never a row pointing at nothing.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::traits::BlobStore;
use sharebox_core::types::{FileId, FolderId};
use sharebox_database::{FileRepository, FolderRepository};
use sharebox_entity::file::File;
use sharebox_entity::folder::Folder;
use sharebox_entity::resource::ResourceRef;

use crate::context::RequestContext;
use crate::permission::PermissionRegistry;

/// What a delete removed, and which blobs it could not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Folder rows deleted.
    pub folders_removed: u64,
    /// File rows deleted.
    pub files_removed: u64,
    /// Grants revoked across all removed resources.
    pub grants_revoked: u64,
    /// Storage keys whose blob could not be removed.
    pub unremoved_blobs: Vec<String>,
}

impl CascadeReport {
    /// Whether every blob was removed along with its metadata.
    pub fn is_clean(&self) -> bool {
        self.unremoved_blobs.is_empty()
    }
}

/// Orchestrates deletes across folders, files, grants, and blobs.
pub struct CascadeCoordinator {
    folders: Arc<dyn FolderRepository>,
    files: Arc<dyn FileRepository>,
    registry: Arc<PermissionRegistry>,
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for CascadeCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeCoordinator")
            .field("blobs", &self.blobs)
            .finish_non_exhaustive()
    }
}

impl CascadeCoordinator {
    /// Creates a new coordinator.
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        files: Arc<dyn FileRepository>,
        registry: Arc<PermissionRegistry>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            folders,
            files,
            registry,
            blobs,
        }
    }

    /// Delete a folder the caller owns together with everything beneath it.
    ///
    /// Children are removed before their parent using an explicit stack, so
    /// depth is bounded only by memory. Blob failures are logged and listed
    /// in the report; any other failure stops the walk, leaving already
    /// deleted branches deleted.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<CascadeReport> {
        let root = self
            .folders
            .find_by_id_and_owner(folder_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        let mut report = CascadeReport::default();
        let mut seen = HashSet::from([root.id]);
        let mut stack: Vec<(Folder, bool)> = vec![(root, false)];

        while let Some((folder, expanded)) = stack.pop() {
            if expanded {
                self.remove_folder_contents(&folder, &mut report).await?;
                continue;
            }

            let children = self
                .folders
                .find_children(folder.owner_id, Some(folder.id))
                .await?;
            stack.push((folder, true));
            for child in children {
                if !seen.insert(child.id) {
                    return Err(AppError::cycle_detected(format!(
                        "Folder {} is reachable twice below the deleted folder",
                        child.id
                    )));
                }
                stack.push((child, false));
            }
        }

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            folders = report.folders_removed,
            files = report.files_removed,
            grants = report.grants_revoked,
            unremoved_blobs = report.unremoved_blobs.len(),
            "Folder tree deleted"
        );
        Ok(report)
    }

    /// Delete a file the caller owns: grants, then record, then content.
    ///
    /// The report lists the storage key if the content could not be removed.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<CascadeReport> {
        let file = self
            .files
            .find_by_id_and_owner(file_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let mut report = CascadeReport::default();
        self.remove_file(&file, &mut report).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            grants = report.grants_revoked,
            clean = report.is_clean(),
            "File deleted"
        );
        Ok(report)
    }

    /// Remove the files directly inside `folder`, its grants, then its row.
    async fn remove_folder_contents(
        &self,
        folder: &Folder,
        report: &mut CascadeReport,
    ) -> AppResult<()> {
        for file in self.files.find_in_folder(folder.owner_id, Some(folder.id)).await? {
            self.remove_file(&file, report).await?;
        }

        report.grants_revoked += self
            .registry
            .revoke_all_for_resource(ResourceRef::folder(folder.id))
            .await?;
        if self.folders.delete(folder.id).await? {
            report.folders_removed += 1;
        }
        Ok(())
    }

    async fn remove_file(&self, file: &File, report: &mut CascadeReport) -> AppResult<()> {
        report.grants_revoked += self
            .registry
            .revoke_all_for_resource(ResourceRef::file(file.id))
            .await?;
        if self.files.delete(file.id).await? {
            report.files_removed += 1;
        }

        match self.blobs.delete(&file.storage_key).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(file_id = %file.id, storage_key = %file.storage_key, "Blob already absent");
                report.unremoved_blobs.push(file.storage_key.clone());
            }
            Err(e) => {
                warn!(
                    file_id = %file.id,
                    storage_key = %file.storage_key,
                    error = %e,
                    "Failed to delete blob"
                );
                report.unremoved_blobs.push(file.storage_key.clone());
            }
        }
        Ok(())
    }
}
