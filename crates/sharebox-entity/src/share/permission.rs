//! Permission levels carried by grants.

use serde::{Deserialize, Serialize};

/// What a grant lets its holder do.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "permission_level", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionLevel {
    /// View metadata and download content.
    Read,
    /// Everything `Read` allows, plus modification.
    Edit,
}

impl PermissionLevel {
    /// Whether this level covers `required`.
    pub fn allows(&self, required: PermissionLevel) -> bool {
        *self >= required
    }
}

impl std::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "READ"),
            Self::Edit => write!(f, "EDIT"),
        }
    }
}
