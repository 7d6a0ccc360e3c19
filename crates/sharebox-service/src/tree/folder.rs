//! Folder operations.

use tracing::info;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::types::{FolderId, UserId};
use sharebox_entity::folder::{CreateFolder, Folder, FolderContents};
use sharebox_entity::resource::Resource;

use super::{ResourceTree, validate_name};
use crate::access::AccessMode;
use crate::context::RequestContext;

impl ResourceTree {
    /// Create a folder owned by the caller.
    ///
    /// A given `parent_id` must name a folder the caller owns; anything else
    /// is reported as `NotFound`.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        let name = validate_name("Folder", name)?;
        if let Some(parent_id) = parent_id {
            self.owned_folder(parent_id, ctx.user_id).await?;
        }

        let folder = self
            .folders
            .create(&CreateFolder {
                name,
                parent_id,
                owner_id: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder created"
        );
        Ok(folder)
    }

    /// Fetch a folder the caller owns or holds a grant on.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<Folder> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        self.access
            .authorize(&Resource::Folder(folder.clone()), ctx.user_id, AccessMode::Read)
            .await?;
        Ok(folder)
    }

    /// Rename a folder.
    ///
    /// Owners may always rename. Other users may rename only when permission
    /// levels are enforced and they hold an EDIT grant on the folder.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        name: &str,
    ) -> AppResult<Folder> {
        let name = validate_name("Folder", name)?;
        let mut folder = self.writable_folder(ctx, folder_id).await?;
        folder.name = name;

        let folder = self.folders.update(&folder).await?;
        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            name = %folder.name,
            "Folder renamed"
        );
        Ok(folder)
    }

    /// Move a folder under `new_parent_id`, or to the top level when `None`.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        let folder = self.owned_folder(folder_id, ctx.user_id).await?;
        let name = folder.name.clone();
        self.relocate(ctx, folder, name, new_parent_id).await
    }

    /// Set both name and parent in one write.
    ///
    /// `new_parent_id = None` moves the folder to the top level.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        name: &str,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        let name = validate_name("Folder", name)?;
        let folder = self.owned_folder(folder_id, ctx.user_id).await?;
        self.relocate(ctx, folder, name, new_parent_id).await
    }

    /// Folders and files directly under `parent_id` (top level when `None`).
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        parent_id: Option<FolderId>,
    ) -> AppResult<FolderContents> {
        if let Some(parent_id) = parent_id {
            self.owned_folder(parent_id, ctx.user_id).await?;
        }

        let folders = self.folders.find_children(ctx.user_id, parent_id).await?;
        let files = self.files.find_in_folder(ctx.user_id, parent_id).await?;
        Ok(FolderContents {
            parent_id,
            folders,
            files,
        })
    }

    /// Validate the new parent, then write name and parent together.
    async fn relocate(
        &self,
        ctx: &RequestContext,
        mut folder: Folder,
        name: String,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        if let Some(parent_id) = new_parent_id {
            if parent_id == folder.id {
                return Err(AppError::cycle_detected("A folder cannot be its own parent"));
            }
            self.owned_folder(parent_id, ctx.user_id).await?;
            if self.is_descendant(parent_id, folder.id, ctx.user_id).await? {
                return Err(AppError::cycle_detected(
                    "Cannot move a folder into one of its descendants",
                ));
            }
        }

        folder.name = name;
        folder.parent_id = new_parent_id;
        let folder = self.folders.update(&folder).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder moved"
        );
        Ok(folder)
    }

    /// Fetch a folder only if `owner` owns it; `NotFound` otherwise.
    pub(crate) async fn owned_folder(&self, folder_id: FolderId, owner: UserId) -> AppResult<Folder> {
        self.folders
            .find_by_id_and_owner(folder_id, owner)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn writable_folder(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<Folder> {
        if let Some(folder) = self.folders.find_by_id_and_owner(folder_id, ctx.user_id).await? {
            return Ok(folder);
        }
        if !self.access.levels_enforced() {
            return Err(AppError::not_found("Folder not found"));
        }

        let folder = self
            .folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        self.access
            .authorize(&Resource::Folder(folder.clone()), ctx.user_id, AccessMode::Write)
            .await?;
        Ok(folder)
    }
}
