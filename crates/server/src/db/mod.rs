//! Document storage for Sugarbook.
//!
//! Every entity is a JSON document in a named collection. Owner-scoped
//! collections (clients, ingredients, recipes, orders) carry the owning
//! user's id in a top-level `userId` field and are only ever queried with
//! that field in the filter.
//!
//! # Backends
//!
//! - [`PgDocumentStore`] - `PostgreSQL`, one `documents` table with a `JSONB` body
//! - [`MemoryDocumentStore`] - process-local, for tests and local development
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p sugarbook-cli -- migrate
//! ```

pub mod memory;
pub mod owned;
pub mod postgres;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use memory::MemoryDocumentStore;
pub use owned::{OwnedDocument, OwnedRepository};
pub use postgres::PgDocumentStore;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or does not match the entity shape.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Named document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Clients,
    Ingredients,
    Recipes,
    Orders,
}

impl Collection {
    /// Collection name as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Clients => "clients",
            Self::Ingredients => "ingredients",
            Self::Recipes => "recipes",
            Self::Orders => "orders",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality filter on top-level string fields of a document.
///
/// All clauses must match. An empty filter matches every document in the
/// collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<(&'static str, String)>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `field == value` clause.
    #[must_use]
    pub fn where_eq(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.clauses.push((field, value.into()));
        self
    }

    /// All documents owned by `owner`.
    #[must_use]
    pub fn owned_by(owner: impl Into<String>) -> Self {
        Self::new().where_eq(fields::USER_ID, owner)
    }

    /// The document `id`, but only if it is owned by `owner`.
    #[must_use]
    pub fn owned(owner: impl Into<String>, id: impl Into<String>) -> Self {
        Self::owned_by(owner).where_eq(fields::ID, id)
    }

    /// Clauses in insertion order.
    #[must_use]
    pub fn clauses(&self) -> &[(&'static str, String)] {
        &self.clauses
    }

    /// Whether `document` satisfies every clause.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        self.clauses.iter().all(|(field, expected)| {
            document
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|actual| actual == expected)
        })
    }
}

/// Well-known top-level document fields.
pub mod fields {
    pub const ID: &str = "id";
    pub const USER_ID: &str = "userId";
    pub const EMAIL: &str = "email";
}

/// Persistence port: a minimal document database.
///
/// Object-safe and async-friendly via `async_trait` so handlers can share an
/// `Arc<dyn DocumentStore>` regardless of backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. The document must be a JSON object with a
    /// string `id` field.
    async fn insert_one(&self, collection: Collection, document: Value)
    -> Result<(), RepositoryError>;

    /// First document matching `filter`, if any.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Value>, RepositoryError>;

    /// All documents matching `filter`, in insertion order.
    async fn find(&self, collection: Collection, filter: &Filter)
    -> Result<Vec<Value>, RepositoryError>;

    /// Shallow-merge `patch` into the first document matching `filter`.
    ///
    /// Every key of `patch` overwrites the stored key, explicit `null`s
    /// included. Returns the updated document, or `None` when nothing matched.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>, RepositoryError>;

    /// Delete the first document matching `filter`. Returns `true` if a
    /// document was deleted.
    async fn delete_one(&self, collection: Collection, filter: &Filter)
    -> Result<bool, RepositoryError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Decode a stored document into an entity.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    collection: Collection,
    document: Value,
) -> Result<T, RepositoryError> {
    serde_json::from_value(document).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid {collection} document: {e}"))
    })
}

/// Encode an entity as a stored document.
pub(crate) fn encode<T: serde::Serialize>(
    collection: Collection,
    entity: &T,
) -> Result<Value, RepositoryError> {
    serde_json::to_value(entity).map_err(|e| {
        RepositoryError::DataCorruption(format!("cannot encode {collection} document: {e}"))
    })
}

/// Encode a patch struct as a merge object. Fields skipped during
/// serialization are left untouched by the merge.
pub(crate) fn encode_patch<T: serde::Serialize>(
    collection: Collection,
    patch: &T,
) -> Result<Map<String, Value>, RepositoryError> {
    match encode(collection, patch)? {
        Value::Object(map) => Ok(map),
        other => Err(RepositoryError::DataCorruption(format!(
            "{collection} patch must be an object, got {other}"
        ))),
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
