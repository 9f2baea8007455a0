//! Domain models for Sugarbook.
//!
//! JSON field names are camelCase on the wire and in storage. Each
//! owner-scoped entity comes with a creation shape (`*Draft`, [`NewOrder`])
//! and, where updates are partial, a patch shape.

pub mod client;
pub mod ingredient;
pub mod order;
pub mod recipe;
pub mod user;

pub use client::{Client, ClientDraft};
pub use ingredient::{Ingredient, IngredientDraft};
pub use order::{ClientSnapshot, NewOrder, Order, OrderPatch};
pub use recipe::{Recipe, RecipeDraft, RecipeIngredient};
pub use user::{StoredUser, User, UserPatch};
