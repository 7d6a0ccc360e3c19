//! File operations.

use bytes::Bytes;
use tracing::{info, warn};

use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_core::types::{FileId, FolderId};
use sharebox_entity::file::{CreateFile, File};
use sharebox_entity::resource::Resource;

use super::{ResourceTree, validate_name};
use crate::access::AccessMode;
use crate::context::RequestContext;

/// Content type recorded when the uploader supplies none.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Longest content type the file record can hold.
const MAX_CONTENT_TYPE_LEN: usize = 255;

/// An incoming upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Target folder (top level when `None`).
    pub folder_id: Option<FolderId>,
    /// Client-supplied file name; any directory part is dropped.
    pub name: String,
    /// Client-supplied MIME type.
    pub content_type: Option<String>,
    /// File content.
    pub data: Bytes,
}

impl ResourceTree {
    /// Store content and record a file owned by the caller.
    ///
    /// The target folder is checked before any bytes are written. If the
    /// record cannot be saved the stored blob is removed again.
    pub async fn upload_file(&self, ctx: &RequestContext, upload: UploadFile) -> AppResult<File> {
        let name = validate_name("File", base_name(&upload.name))?;
        let content_type = content_type_or_default(upload.content_type)?;
        if let Some(folder_id) = upload.folder_id {
            self.owned_folder(folder_id, ctx.user_id).await?;
        }

        let size_bytes = i64::try_from(upload.data.len())
            .map_err(|_| AppError::validation("File is too large"))?;
        let storage_key = self.blobs.put(upload.data).await?;

        let record = CreateFile {
            storage_key: storage_key.clone(),
            name,
            content_type,
            size_bytes,
            owner_id: ctx.user_id,
            folder_id: upload.folder_id,
        };

        let file = match self.files.create(&record).await {
            Ok(file) => file,
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&storage_key).await {
                    warn!(storage_key = %storage_key, error = %cleanup, "Failed to remove orphaned blob");
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            folder_id = ?file.folder_id,
            size_bytes = file.size_bytes,
            "File uploaded"
        );
        Ok(file)
    }

    /// Fetch file metadata the caller owns or holds a grant on.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<File> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        self.access
            .authorize(&Resource::File(file.clone()), ctx.user_id, AccessMode::Read)
            .await?;
        Ok(file)
    }

    /// Fetch file metadata and content the caller owns or holds a grant on.
    pub async fn download_file(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<(File, Bytes)> {
        let file = self.get_file(ctx, file_id).await?;
        let data = self.read_content(&file).await?;
        Ok((file, data))
    }

    /// Read the stored bytes of `file`.
    ///
    /// A record whose blob has vanished is a storage failure, not a missing file.
    pub async fn read_content(&self, file: &File) -> AppResult<Bytes> {
        self.blobs.get(&file.storage_key).await.map_err(|e| {
            if e.is(ErrorKind::NotFound) {
                AppError::storage(format!("Content of file {} is missing", file.id))
            } else {
                e
            }
        })
    }

    /// Rename a file.
    ///
    /// Owners may always rename. Other users may rename only when permission
    /// levels are enforced and they hold an EDIT grant on the file.
    pub async fn rename_file(&self, ctx: &RequestContext, file_id: FileId, name: &str) -> AppResult<File> {
        let name = validate_name("File", name)?;
        let mut file = self.writable_file(ctx, file_id).await?;
        file.name = name;

        let file = self.files.update(&file).await?;
        info!(user_id = %ctx.user_id, file_id = %file.id, name = %file.name, "File renamed");
        Ok(file)
    }

    /// Move a file into `folder_id`, or to the top level when `None`.
    pub async fn move_file(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        folder_id: Option<FolderId>,
    ) -> AppResult<File> {
        let mut file = self
            .files
            .find_by_id_and_owner(file_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        if let Some(folder_id) = folder_id {
            self.owned_folder(folder_id, ctx.user_id).await?;
        }

        file.folder_id = folder_id;
        let file = self.files.update(&file).await?;
        info!(user_id = %ctx.user_id, file_id = %file.id, folder_id = ?file.folder_id, "File moved");
        Ok(file)
    }

    async fn writable_file(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<File> {
        if let Some(file) = self.files.find_by_id_and_owner(file_id, ctx.user_id).await? {
            return Ok(file);
        }
        if !self.access.levels_enforced() {
            return Err(AppError::not_found("File not found"));
        }

        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        self.access
            .authorize(&Resource::File(file.clone()), ctx.user_id, AccessMode::Write)
            .await?;
        Ok(file)
    }
}

/// Trimmed client content type, or the default when none was given.
fn content_type_or_default(content_type: Option<String>) -> AppResult<String> {
    let Some(content_type) = content_type
        .map(|ct| ct.trim().to_string())
        .filter(|ct| !ct.is_empty())
    else {
        return Ok(DEFAULT_CONTENT_TYPE.to_string());
    };
    if content_type.chars().count() > MAX_CONTENT_TYPE_LEN {
        return Err(AppError::validation(format!(
            "Content type must be at most {MAX_CONTENT_TYPE_LEN} characters"
        )));
    }
    Ok(content_type)
}

/// Last path segment of a client-supplied name.
fn base_name(name: &str) -> &str {
    name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name)
}
