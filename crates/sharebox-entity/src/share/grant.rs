//! Share grant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sharebox_core::types::{GrantId, UserId};
use sqlx::FromRow;
use uuid::Uuid;

use super::permission::PermissionLevel;
use crate::resource::{ResourceKind, ResourceRef};

/// Access to one resource, either for a named user or for anyone holding a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ShareGrant {
    /// Unique grant identifier.
    pub id: GrantId,
    /// Id of the shared file or folder.
    pub resource_id: Uuid,
    /// Kind of the shared resource.
    pub resource_kind: ResourceKind,
    /// Grantee. Absent for public-link grants.
    pub target_user_id: Option<UserId>,
    /// Level granted.
    pub permission: PermissionLevel,
    /// Whether this grant is a public link.
    pub is_public: bool,
    /// Link token. Present exactly when `is_public` is set.
    pub public_token: Option<String>,
    /// When the grant stops being valid.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

impl ShareGrant {
    /// The resource this grant refers to.
    pub fn resource(&self) -> ResourceRef {
        ResourceRef {
            id: self.resource_id,
            kind: self.resource_kind,
        }
    }

    /// Whether the grant has expired at `now`.
    ///
    /// A grant that expires exactly at `now` is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// Build a new record from creation data.
    pub fn from_create(data: CreateGrant) -> Self {
        Self {
            id: GrantId::new(),
            resource_id: data.resource.id,
            resource_kind: data.resource.kind,
            target_user_id: data.target_user_id,
            permission: data.permission,
            is_public: data.public_token.is_some(),
            public_token: data.public_token,
            expires_at: data.expires_at,
            created_at: Utc::now(),
        }
    }
}

/// Data required to create a new grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGrant {
    /// The shared resource.
    pub resource: ResourceRef,
    /// Grantee for targeted grants.
    pub target_user_id: Option<UserId>,
    /// Level granted.
    pub permission: PermissionLevel,
    /// Link token for public grants.
    pub public_token: Option<String>,
    /// Expiration.
    pub expires_at: Option<DateTime<Utc>>,
}
