//! Recipe costing.

use std::collections::HashMap;

use serde::Serialize;
use tracing::instrument;

use sugarbook_core::{IngredientId, RecipeId, UserId};

use super::ServiceError;
use crate::db::{DocumentStore, OwnedDocument, OwnedRepository};
use crate::models::{Ingredient, Recipe};

/// Cost rollup for a recipe. No rounding is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Sum of `price * quantity` over the resolvable ingredient lines.
    pub recipe_cost: f64,
    pub labor_cost: f64,
    /// `recipe_cost + labor_cost`.
    pub total_cost: f64,
    pub markup: f64,
    /// `total_cost * (1 + markup / 100)`.
    pub final_price: f64,
}

impl CostBreakdown {
    /// Price `recipe` against the given ingredient prices.
    ///
    /// Lines whose ingredient is missing from `prices` contribute nothing.
    #[must_use]
    pub fn compute(recipe: &Recipe, prices: &HashMap<IngredientId, f64>) -> Self {
        let recipe_cost: f64 = recipe
            .ingredients
            .iter()
            .filter_map(|line| prices.get(&line.ingredient_id).map(|price| price * line.quantity))
            .fold(0.0, |acc, cost| acc + cost);
        let total_cost = recipe_cost + recipe.labor_cost;

        Self {
            recipe_cost,
            labor_cost: recipe.labor_cost,
            total_cost,
            markup: recipe.markup,
            final_price: total_cost * (1.0 + recipe.markup / 100.0),
        }
    }
}

/// Prices recipes from the owner's ingredient list.
pub struct CostingService<'a> {
    recipes: OwnedRepository<'a, Recipe>,
    ingredients: OwnedRepository<'a, Ingredient>,
}

impl<'a> CostingService<'a> {
    #[must_use]
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            recipes: OwnedRepository::new(store),
            ingredients: OwnedRepository::new(store),
        }
    }

    /// Compute the cost breakdown of `recipe_id`.
    ///
    /// Ingredients are resolved against `owner`'s own list only.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the recipe is not owned by `owner`.
    #[instrument(skip(self), fields(user_id = %owner, recipe_id = %recipe_id))]
    pub async fn calculate(
        &self,
        owner: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<CostBreakdown, ServiceError> {
        let recipe = self
            .recipes
            .get(owner, recipe_id)
            .await?
            .ok_or(ServiceError::NotFound(Recipe::ENTITY))?;

        let prices: HashMap<IngredientId, f64> = self
            .ingredients
            .list(owner)
            .await?
            .into_iter()
            .map(|ingredient| (ingredient.id, ingredient.price))
            .collect();

        Ok(CostBreakdown::compute(&recipe, &prices))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryDocumentStore;
    use crate::models::{IngredientDraft, RecipeDraft, RecipeIngredient};

    fn line(id: &IngredientId, quantity: f64) -> RecipeIngredient {
        RecipeIngredient {
            ingredient_id: id.clone(),
            quantity,
        }
    }

    fn draft(lines: Vec<RecipeIngredient>, labor_cost: f64, markup: f64) -> RecipeDraft {
        RecipeDraft {
            name: "Bolo de cenoura".to_owned(),
            image_url: None,
            description: String::new(),
            labor_cost,
            markup,
            ingredients: lines,
        }
    }

    #[test]
    fn test_breakdown_arithmetic() {
        let flour = IngredientId::new("flour");
        let sugar = IngredientId::new("sugar");
        let prices = HashMap::from([(flour.clone(), 25.5), (sugar.clone(), 30.0)]);
        let recipe = Recipe::new(
            UserId::new("u1"),
            draft(vec![line(&flour, 1.0), line(&sugar, 0.5)], 50.0, 20.0),
        );

        let cost = CostBreakdown::compute(&recipe, &prices);
        assert!((cost.recipe_cost - 40.5).abs() < f64::EPSILON);
        assert!((cost.total_cost - 90.5).abs() < f64::EPSILON);
        assert!((cost.final_price - 90.5 * 1.2).abs() < 1e-9);
        assert!((cost.final_price - 108.6).abs() < 1e-9);
    }

    #[test]
    fn test_missing_ingredient_contributes_zero() {
        let recipe = Recipe::new(
            UserId::new("u1"),
            draft(vec![line(&IngredientId::new("gone"), 3.0)], 10.0, 0.0),
        );
        let cost = CostBreakdown::compute(&recipe, &HashMap::new());
        assert!(cost.recipe_cost.abs() < f64::EPSILON);
        assert!(cost.recipe_cost.is_sign_positive());
        assert!((cost.final_price - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recipe_without_ingredients_costs_positive_zero() {
        let recipe = Recipe::new(UserId::new("u1"), draft(Vec::new(), 10.0, 0.0));
        let cost = CostBreakdown::compute(&recipe, &HashMap::new());

        let json = serde_json::to_value(&cost).unwrap();
        assert_eq!(json["recipeCost"].to_string(), "0.0");
        assert!((cost.total_cost - 10.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_calculate_uses_only_owned_ingredients() {
        let store = MemoryDocumentStore::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        let ingredients = OwnedRepository::<Ingredient>::new(&store);
        let butter = Ingredient::new(
            bob.clone(),
            IngredientDraft {
                name: "Butter".to_owned(),
                unit: "kg".to_owned(),
                price: 40.0,
            },
        );
        ingredients.insert(&butter).await.unwrap();

        let recipe = Recipe::new(alice.clone(), draft(vec![line(&butter.id, 1.0)], 5.0, 100.0));
        OwnedRepository::<Recipe>::new(&store)
            .insert(&recipe)
            .await
            .unwrap();

        let cost = CostingService::new(&store)
            .calculate(&alice, &recipe.id)
            .await
            .unwrap();
        assert!(cost.recipe_cost.abs() < f64::EPSILON);
        assert!((cost.final_price - 10.0).abs() < f64::EPSILON);

        let err = CostingService::new(&store)
            .calculate(&bob, &recipe.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("Recipe")));
    }
}
