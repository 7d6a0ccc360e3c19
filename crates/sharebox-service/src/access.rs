//! Owner-or-grantee authorization.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::types::UserId;
use sharebox_entity::resource::{Resource, Shareable};
use sharebox_entity::share::PermissionLevel;

use crate::permission::PermissionRegistry;

/// What the actor wants to do with a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// View metadata or download content.
    Read,
    /// Modify the resource.
    Write,
}

/// Why access was allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "via", content = "permission")]
pub enum Access {
    /// The actor owns the resource.
    Owner,
    /// The actor holds a targeted grant at this level.
    Grantee(PermissionLevel),
}

/// Decides whether an actor may read or modify a resource.
#[derive(Debug)]
pub struct AccessResolver {
    registry: Arc<PermissionRegistry>,
}

impl AccessResolver {
    /// Creates a new resolver over `registry`.
    pub fn new(registry: Arc<PermissionRegistry>) -> Self {
        Self { registry }
    }

    /// Whether READ and EDIT grants are told apart on write access.
    pub fn levels_enforced(&self) -> bool {
        self.registry.levels_enforced()
    }

    /// Allow the owner, then any targeted grantee; otherwise `Forbidden`.
    ///
    /// When permission levels are enforced, `Write` additionally requires an
    /// EDIT grant. Public links never pass through here.
    pub async fn authorize(
        &self,
        resource: &Resource,
        actor: UserId,
        mode: AccessMode,
    ) -> AppResult<Access> {
        if resource.owner_id() == actor {
            return Ok(Access::Owner);
        }

        let reference = resource.resource_ref();
        let Some(level) = self.registry.user_permission(reference, actor).await? else {
            debug!(actor = %actor, resource = %reference, "Access denied: no grant");
            return Err(AppError::forbidden(format!(
                "You do not have access to this {}",
                reference.kind
            )));
        };

        if mode == AccessMode::Write
            && self.levels_enforced()
            && !level.allows(PermissionLevel::Edit)
        {
            debug!(actor = %actor, resource = %reference, "Write denied: read-only grant");
            return Err(AppError::forbidden(format!(
                "Your share on this {} is read-only",
                reference.kind
            )));
        }

        Ok(Access::Grantee(level))
    }
}
