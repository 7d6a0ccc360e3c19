//! Direct children of a folder position.

use serde::{Deserialize, Serialize};
use sharebox_core::types::FolderId;

use super::model::Folder;
use crate::file::File;

/// Folders and files sitting directly under one parent (or at the top level).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderContents {
    /// The listed parent; `None` for the top level.
    pub parent_id: Option<FolderId>,
    /// Child folders.
    pub folders: Vec<Folder>,
    /// Child files.
    pub files: Vec<File>,
}

impl FolderContents {
    /// Whether nothing sits under this parent.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}
