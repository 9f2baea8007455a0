//! Ingredient price list.

use serde::{Deserialize, Serialize};

use sugarbook_core::{IngredientId, UserId};

use crate::db::{Collection, OwnedDocument};

/// An ingredient with its price per `unit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: IngredientId,
    pub user_id: UserId,
    pub name: String,
    pub unit: String,
    pub price: f64,
}

impl Ingredient {
    #[must_use]
    pub fn new(owner: UserId, draft: IngredientDraft) -> Self {
        Self {
            id: IngredientId::generate(),
            user_id: owner,
            name: draft.name,
            unit: draft.unit,
            price: draft.price,
        }
    }
}

/// Creation and full-replace shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDraft {
    pub name: String,
    pub unit: String,
    pub price: f64,
}

impl OwnedDocument for Ingredient {
    type Id = IngredientId;
    const COLLECTION: Collection = Collection::Ingredients;
    const ENTITY: &'static str = "Ingredient";
}
