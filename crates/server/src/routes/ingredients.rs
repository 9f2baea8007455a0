//! Ingredient price list handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use sugarbook_core::IngredientId;

use super::owned::{self, Deleted};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Ingredient, IngredientDraft};
use crate::state::AppState;

pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Ingredient>>> {
    owned::list(&state, &user.id).await
}

pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(draft): Json<IngredientDraft>,
) -> Result<Json<Ingredient>> {
    owned::insert(&state, Ingredient::new(user.id, draft)).await
}

pub async fn replace(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<IngredientId>,
    Json(draft): Json<IngredientDraft>,
) -> Result<Json<Ingredient>> {
    owned::replace::<Ingredient, _>(&state, &user.id, &id, &draft).await
}

/// Delete an ingredient. Recipes referencing it keep the reference and cost
/// it at zero.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<IngredientId>,
) -> Result<Json<Deleted>> {
    owned::delete::<Ingredient>(&state, &user.id, &id).await
}
