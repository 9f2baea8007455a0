//! Bearer token authentication.
//!
//! Provides the extractor that resolves `Authorization: Bearer <token>` to
//! the calling user in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::{AppError, INVALID_TOKEN_DETAIL, set_sentry_user};
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Extractor that requires a valid bearer token for a user that still exists.
///
/// Rejects with 401 `{"detail": "Could not validate credentials"}` otherwise.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> Json<User> {
///     Json(user)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| AppError::Unauthorized(INVALID_TOKEN_DETAIL.to_owned()))?;

        let user = AuthService::new(state.store(), state.tokens())
            .authenticate(token)
            .await
            .inspect_err(|e| tracing::debug!(error = %e, "bearer token rejected"))?;

        set_sentry_user(&user.id);
        Ok(Self(user))
    }
}

/// The token of a `Bearer` authorization header. The scheme is matched
/// case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
