//! [`AuthProvider`] backed by JWT bearer tokens.

use async_trait::async_trait;
use tracing::debug;

use sharebox_core::config::AuthConfig;
use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::traits::{AuthProvider, Credentials};
use sharebox_core::types::UserId;

use crate::jwt::JwtDecoder;

/// Authenticates callers by validating their bearer token.
#[derive(Debug, Clone)]
pub struct JwtAuthProvider {
    decoder: JwtDecoder,
}

impl JwtAuthProvider {
    /// Create a provider from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoder: JwtDecoder::new(config),
        }
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn authenticate(&self, credentials: &Credentials) -> AppResult<UserId> {
        match credentials {
            Credentials::Bearer(token) if token.trim().is_empty() => {
                Err(AppError::authentication("Empty bearer token"))
            }
            Credentials::Bearer(token) => {
                let claims = self.decoder.decode(token.trim())?;
                debug!(user_id = %claims.sub, jti = %claims.jti, "Bearer token accepted");
                Ok(claims.user_id())
            }
        }
    }
}
