//! JWT token validation.
//!
//! Tokens are minted by the identity service; this module only verifies
//! them.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ledgerdesk_core::config::auth::AuthConfig;
use ledgerdesk_core::error::AppError;
use ledgerdesk_entity::user::UserRole;

/// Claims carried by a dashboard access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: Uuid,
    /// Display name.
    pub name: String,
    /// The user's role.
    pub role: UserRole,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Validates bearer tokens against the configured HMAC secret.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator").finish()
    }
}

impl TokenValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(format!("Invalid token: {e}")))
    }
}
