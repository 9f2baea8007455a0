//! Recipes and their ingredient lines.
//!
//! Ingredient references are soft: nothing checks that an `ingredientId`
//! exists when a recipe is written. Costing skips lines whose ingredient is
//! gone.

use serde::{Deserialize, Deserializer, Serialize};

use sugarbook_core::{IngredientId, RecipeId, UserId};

use crate::db::{Collection, OwnedDocument};

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub ingredient_id: IngredientId,
    pub quantity: f64,
}

/// A recipe with labor cost and markup percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub labor_cost: f64,
    /// Percentage applied on top of the total cost.
    #[serde(default)]
    pub markup: f64,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    #[must_use]
    pub fn new(owner: UserId, draft: RecipeDraft) -> Self {
        Self {
            id: RecipeId::generate(),
            user_id: owner,
            name: draft.name,
            image_url: draft.image_url,
            description: draft.description,
            labor_cost: draft.labor_cost,
            markup: draft.markup,
            ingredients: draft.ingredients,
        }
    }
}

/// Creation and full-replace shape.
///
/// `imageUrl` is part of the shape so a replace can attach a previously
/// uploaded image; leaving it out clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub labor_cost: f64,
    #[serde(default)]
    pub markup: f64,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

impl OwnedDocument for Recipe {
    type Id = RecipeId;
    const COLLECTION: Collection = Collection::Recipes;
    const ENTITY: &'static str = "Recipe";
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft: RecipeDraft = serde_json::from_value(json!({"name": "Brigadeiro"})).unwrap();
        assert_eq!(draft.description, "");
        assert!(draft.image_url.is_none());
        assert!(draft.ingredients.is_empty());
        assert!(draft.labor_cost.abs() < f64::EPSILON);
        assert!(draft.markup.abs() < f64::EPSILON);
    }

    #[test]
    fn test_null_description_becomes_empty() {
        let draft: RecipeDraft =
            serde_json::from_value(json!({"name": "Bolo", "description": null})).unwrap();
        assert_eq!(draft.description, "");
    }

    #[test]
    fn test_ingredient_lines_use_camel_case() {
        let draft: RecipeDraft = serde_json::from_value(json!({
            "name": "Bolo",
            "ingredients": [{"ingredientId": "i1", "quantity": 0.5}]
        }))
        .unwrap();
        assert_eq!(draft.ingredients[0].ingredient_id.as_str(), "i1");

        let recipe = Recipe::new(UserId::new("u1"), draft);
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["laborCost"], 0.0);
        assert_eq!(value["imageUrl"], serde_json::Value::Null);
    }
}
