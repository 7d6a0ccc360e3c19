//! Credential validation seam used by the HTTP layer.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UserId;

/// Raw credentials presented by a caller.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// An `Authorization: Bearer` token.
    Bearer(String),
}

/// Turns presented credentials into a user identity.
#[async_trait]
pub trait AuthProvider: Send + Sync + 'static {
    /// Validate `credentials` and return the authenticated user.
    ///
    /// Fails with an `Authentication` error when the credentials are
    /// missing, malformed, expired, or otherwise rejected.
    async fn authenticate(&self, credentials: &Credentials) -> AppResult<UserId>;
}
