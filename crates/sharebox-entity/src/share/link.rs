//! Public link value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::grant::ShareGrant;

/// Path prefix under which public links are served.
pub const PUBLIC_SHARE_PATH: &str = "/public/share";

/// A shareable URL for a public grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicLink {
    /// The link token.
    pub token: String,
    /// The full URL for accessing the share.
    pub url: String,
    /// When the link expires (if set).
    pub expires_at: Option<DateTime<Utc>>,
}

impl PublicLink {
    /// Build the link for `grant` under `base_url`. Returns `None` for targeted grants.
    pub fn for_grant(grant: &ShareGrant, base_url: &str) -> Option<Self> {
        let token = grant.public_token.as_ref()?;
        Some(Self {
            token: token.clone(),
            url: format!(
                "{}{PUBLIC_SHARE_PATH}/{token}",
                base_url.trim_end_matches('/')
            ),
            expires_at: grant.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use sharebox_core::types::{FileId, UserId};

    use super::*;
    use crate::resource::ResourceRef;
    use crate::share::{CreateGrant, PermissionLevel};

    #[test]
    fn test_url_joins_base_and_token() {
        let grant = ShareGrant::from_create(CreateGrant {
            resource: ResourceRef::file(FileId::new()),
            target_user_id: None,
            permission: PermissionLevel::Read,
            public_token: Some("abc".into()),
            expires_at: None,
        });
        let link = PublicLink::for_grant(&grant, "https://box.example/").expect("public");
        assert_eq!(link.url, "https://box.example/public/share/abc");
    }

    #[test]
    fn test_targeted_grant_has_no_link() {
        let grant = ShareGrant::from_create(CreateGrant {
            resource: ResourceRef::file(FileId::new()),
            target_user_id: Some(UserId::new()),
            permission: PermissionLevel::Edit,
            public_token: None,
            expires_at: None,
        });
        assert!(PublicLink::for_grant(&grant, "http://x").is_none());
    }
}
