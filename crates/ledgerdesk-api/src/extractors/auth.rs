//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! validates it, and injects the caller's identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_entity::user::UserRole;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's user id.
    pub user_id: Uuid,
    /// The caller's display name.
    pub username: String,
    /// The caller's role.
    pub role: UserRole,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.token_validator.decode_token(token)?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.name,
            role: claims.role,
        })
    }
}
