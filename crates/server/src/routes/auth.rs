//! Authentication route handlers.
//!
//! Signup and login are open; `me` requires a bearer token.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{User, UserPatch};
use crate::services::auth::{AuthService, IssuedToken};
use crate::services::profile::ProfileService;
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new account.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<IssuedToken>> {
    let issued = AuthService::new(state.store(), state.tokens())
        .signup(&request.name, &request.email, &request.password)
        .await?;
    Ok(Json(issued))
}

/// Exchange email and password for a token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<IssuedToken>> {
    let issued = AuthService::new(state.store(), state.tokens())
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(issued))
}

/// The authenticated user.
pub async fn me(RequireAuth(user): RequireAuth) -> Json<User> {
    Json(user)
}

/// Update the authenticated user's name and/or theme.
pub async fn update_me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>> {
    let updated = ProfileService::new(state.store(), state.uploads())
        .update(&user.id, &patch)
        .await?;
    Ok(Json(updated))
}
