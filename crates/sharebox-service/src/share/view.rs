//! Presentation shapes for grants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sharebox_core::types::{GrantId, UserId};
use sharebox_entity::resource::{Resource, ResourceKind};
use sharebox_entity::share::{PermissionLevel, PublicLink, ShareGrant};

/// A grant together with the name of what it shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareView {
    /// Grant ID.
    pub id: GrantId,
    /// Shared resource ID.
    pub resource_id: Uuid,
    /// Shared resource kind.
    pub resource_kind: ResourceKind,
    /// Shared resource name, looked up directly from the resource.
    pub resource_name: String,
    /// Grantee for targeted grants.
    pub target_user_id: Option<UserId>,
    /// Level granted.
    pub permission: PermissionLevel,
    /// Whether this is a public link.
    pub is_public: bool,
    /// Link details for public grants.
    pub public_link: Option<PublicLink>,
    /// Expiration.
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ShareView {
    /// Build a view of `grant` on a resource named `resource_name`.
    pub fn new(grant: ShareGrant, resource_name: String, base_url: &str) -> Self {
        let public_link = PublicLink::for_grant(&grant, base_url);
        Self {
            id: grant.id,
            resource_id: grant.resource_id,
            resource_kind: grant.resource_kind,
            resource_name,
            target_user_id: grant.target_user_id,
            permission: grant.permission,
            is_public: grant.is_public,
            public_link,
            expires_at: grant.expires_at,
            created_at: grant.created_at,
        }
    }
}

/// What an anonymous visitor sees through a valid public link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicShare {
    /// The shared resource.
    pub resource: Resource,
    /// When the link expires.
    pub expires_at: Option<DateTime<Utc>>,
}
