//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use sharebox_core::config::AuthConfig;
use sharebox_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens signed with the configured secret.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate `token`, returning its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sharebox_core::types::UserId;

    use super::*;
    use crate::jwt::encoder::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_minutes: 5,
            leeway_seconds: 0,
        }
    }

    #[test]
    fn test_issued_token_decodes_to_same_user() {
        let cfg = config("an-adequately-long-secret");
        let user = UserId::new();
        let issued = JwtEncoder::new(&cfg).issue(user).expect("issue");

        let claims = JwtDecoder::new(&cfg).decode(&issued.token).expect("decode");
        assert_eq!(claims.user_id(), user);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issued = JwtEncoder::new(&config("first-secret-value-xx"))
            .issue(UserId::new())
            .expect("issue");

        let err = JwtDecoder::new(&config("second-secret-value-x"))
            .decode(&issued.token)
            .expect_err("bad signature");
        assert_eq!(err.kind, sharebox_core::ErrorKind::Authentication);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let cfg = config("an-adequately-long-secret");
        let issued = JwtEncoder::new(&cfg)
            .issue_with_ttl(UserId::new(), Duration::minutes(-10))
            .expect("issue");

        let err = JwtDecoder::new(&cfg).decode(&issued.token).expect_err("expired");
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_garbage_is_rejected() {
        let cfg = config("an-adequately-long-secret");
        let err = JwtDecoder::new(&cfg).decode("not.a.jwt").expect_err("garbage");
        assert_eq!(err.kind, sharebox_core::ErrorKind::Authentication);
    }
}
