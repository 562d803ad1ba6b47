//! Admin authentication: a shared bearer token from `ADMIN_TOKEN`.

use axum::extract::FromRef;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Proof that the request carried the admin token.
/// Use as a handler parameter to require admin access.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser;

pub(crate) fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Compare fixed-size digests so the check does not leak the token length.
pub(crate) fn token_matches(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}

impl<S> axum::extract::FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let Some(expected) = app_state.config.admin_token.as_deref() else {
            return Err(ApiError::AdminDisabled);
        };

        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(ApiError::Unauthorized)?;

        if token_matches(presented, expected) {
            Ok(Self)
        } else {
            tracing::warn!(path = %parts.uri.path(), "rejected admin request with wrong token");
            Err(ApiError::Unauthorized)
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
