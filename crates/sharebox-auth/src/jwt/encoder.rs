//! JWT token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use sharebox_core::config::AuthConfig;
use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::types::UserId;

use super::claims::Claims;

/// Signs bearer tokens with the configured HMAC secret.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish_non_exhaustive()
    }
}

/// A freshly signed token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: i64::try_from(config.token_ttl_minutes).unwrap_or(i64::MAX / 120),
        }
    }

    /// Issue a token for `user_id` valid for the configured TTL.
    pub fn issue(&self, user_id: UserId) -> Result<IssuedToken, AppError> {
        self.issue_with_ttl(user_id, Duration::minutes(self.ttl_minutes))
    }

    /// Issue a token for `user_id` valid for `ttl` from now.
    pub fn issue_with_ttl(&self, user_id: UserId, ttl: Duration) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + ttl;
        let claims = Claims {
            sub: user_id.into_uuid(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to sign token", e)
        })?;

        Ok(IssuedToken { token, expires_at })
    }
}
