//! Resource kinds and the closed union over shareable entities.

use serde::{Deserialize, Serialize};
use sharebox_core::types::{FileId, FolderId, UserId};
use uuid::Uuid;

use crate::file::File;
use crate::folder::Folder;

/// Kind of resource a grant refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A file.
    File,
    /// A folder.
    Folder,
}

impl ResourceKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = sharebox_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "files" => Ok(Self::File),
            "folder" | "folders" => Ok(Self::Folder),
            _ => Err(sharebox_core::AppError::validation(format!(
                "Invalid resource kind: '{s}'"
            ))),
        }
    }
}

/// Key under which grants are stored: an id plus the kind it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Raw id of the file or folder.
    pub id: Uuid,
    /// Which table the id belongs to.
    pub kind: ResourceKind,
}

impl ResourceRef {
    /// Reference a folder.
    pub fn folder(id: FolderId) -> Self {
        Self {
            id: id.into_uuid(),
            kind: ResourceKind::Folder,
        }
    }

    /// Reference a file.
    pub fn file(id: FileId) -> Self {
        Self {
            id: id.into_uuid(),
            kind: ResourceKind::File,
        }
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Behavior shared by everything that can be owned and shared.
pub trait Shareable {
    /// Grant key for this entity.
    fn resource_ref(&self) -> ResourceRef;

    /// The owning user.
    fn owner_id(&self) -> UserId;

    /// Name shown in listings and share views.
    fn display_name(&self) -> &str;
}

impl Shareable for Folder {
    fn resource_ref(&self) -> ResourceRef {
        ResourceRef::folder(self.id)
    }

    fn owner_id(&self) -> UserId {
        self.owner_id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Shareable for File {
    fn resource_ref(&self) -> ResourceRef {
        ResourceRef::file(self.id)
    }

    fn owner_id(&self) -> UserId {
        self.owner_id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// A loaded file or folder.
///
/// Resolved once at the boundary so that authorization and share views
/// never branch on a kind string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "resource", rename_all = "lowercase")]
pub enum Resource {
    /// A folder.
    Folder(Folder),
    /// A file.
    File(File),
}

impl Resource {
    /// The kind tag.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Folder(_) => ResourceKind::Folder,
            Self::File(_) => ResourceKind::File,
        }
    }
}

impl Shareable for Resource {
    fn resource_ref(&self) -> ResourceRef {
        match self {
            Self::Folder(f) => f.resource_ref(),
            Self::File(f) => f.resource_ref(),
        }
    }

    fn owner_id(&self) -> UserId {
        match self {
            Self::Folder(f) => f.owner_id,
            Self::File(f) => f.owner_id,
        }
    }

    fn display_name(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::File(f) => &f.name,
        }
    }
}

impl From<Folder> for Resource {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}

impl From<File> for Resource {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}
