//! Recipe handlers and cost calculation.

use axum::{
    Json,
    extract::{Path, State},
};

use sugarbook_core::RecipeId;

use super::owned::{self, Deleted};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Recipe, RecipeDraft};
use crate::services::costing::{CostBreakdown, CostingService};
use crate::state::AppState;

/// List the caller's recipes.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Recipe>>> {
    owned::list(&state, &user.id).await
}

/// Create a recipe. Ingredient references are not checked.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(draft): Json<RecipeDraft>,
) -> Result<Json<Recipe>> {
    owned::insert(&state, Recipe::new(user.id, draft)).await
}

/// Replace a recipe, including its ingredient list and image URL.
pub async fn replace(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<RecipeId>,
    Json(draft): Json<RecipeDraft>,
) -> Result<Json<Recipe>> {
    owned::replace::<Recipe, _>(&state, &user.id, &id, &draft).await
}

pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<RecipeId>,
) -> Result<Json<Deleted>> {
    owned::delete::<Recipe>(&state, &user.id, &id).await
}

/// Cost breakdown at current ingredient prices.
pub async fn calculate(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<RecipeId>,
) -> Result<Json<CostBreakdown>> {
    let breakdown = CostingService::new(state.store())
        .calculate(&user.id, &id)
        .await?;
    Ok(Json(breakdown))
}
