//! Client roster handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use sugarbook_core::ClientId;

use super::owned::{self, Deleted};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Client, ClientDraft};
use crate::state::AppState;

/// List the caller's clients.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Client>>> {
    owned::list(&state, &user.id).await
}

/// Add a client.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(draft): Json<ClientDraft>,
) -> Result<Json<Client>> {
    owned::insert(&state, Client::new(user.id, draft)).await
}

/// Replace a client's details. Omitted email/phone are cleared.
pub async fn replace(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ClientId>,
    Json(draft): Json<ClientDraft>,
) -> Result<Json<Client>> {
    owned::replace::<Client, _>(&state, &user.id, &id, &draft).await
}

/// Delete a client. Orders keep their snapshot of it.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ClientId>,
) -> Result<Json<Deleted>> {
    owned::delete::<Client>(&state, &user.id, &id).await
}
