//! Sharing behavior configuration.

use serde::{Deserialize, Serialize};

/// Controls how grants are issued and evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Random bytes in a public-link token before encoding.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
    /// Require an EDIT grant for write access. When off, any grant allows both.
    #[serde(default)]
    pub enforce_permission_levels: bool,
    /// Treat expired targeted-user grants as absent.
    #[serde(default)]
    pub expire_user_grants: bool,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            token_bytes: default_token_bytes(),
            enforce_permission_levels: false,
            expire_user_grants: false,
        }
    }
}

fn default_token_bytes() -> usize {
    32
}
