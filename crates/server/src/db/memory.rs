//! In-process document store.
//!
//! Mirrors the guarantees of the `PostgreSQL` backend: unique `(collection, id)`,
//! unique user emails, insertion-ordered reads and atomic per-document merges.
//! Data lives only as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{Collection, DocumentStore, Filter, RepositoryError, fields};

/// Document store backed by in-memory vectors.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn string_field<'a>(document: &'a Value, field: &str) -> Option<&'a str> {
    document.get(field).and_then(Value::as_str)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Value,
    ) -> Result<(), RepositoryError> {
        let id = string_field(&document, fields::ID)
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!("{collection} document has no string id"))
            })?
            .to_owned();

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        if documents
            .iter()
            .any(|existing| string_field(existing, fields::ID) == Some(id.as_str()))
        {
            return Err(RepositoryError::Conflict(format!(
                "{collection} id already exists"
            )));
        }

        if collection == Collection::Users
            && let Some(email) = string_field(&document, fields::EMAIL)
            && documents
                .iter()
                .any(|existing| string_field(existing, fields::EMAIL) == Some(email))
        {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        documents.push(document);
        Ok(())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Value>, RepositoryError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|d| filter.matches(d)))
            .cloned())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, RepositoryError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|d| filter.matches(d))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>, RepositoryError> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(None);
        };

        let Value::Object(body) = document else {
            return Err(RepositoryError::DataCorruption(format!(
                "{collection} document is not an object"
            )));
        };
        body.extend(patch);

        Ok(Some(document.clone()))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<bool, RepositoryError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(false);
        };

        match documents.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                documents.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_insert_and_find_in_order() {
        let store = MemoryDocumentStore::new();
        for id in ["a", "b", "c"] {
            store
                .insert_one(Collection::Clients, json!({"id": id, "userId": "u1"}))
                .await
                .unwrap();
        }

        let found = store
            .find(Collection::Clients, &Filter::owned_by("u1"))
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = MemoryDocumentStore::new();
        store
            .insert_one(Collection::Clients, json!({"id": "x", "userId": "u1"}))
            .await
            .unwrap();

        let found = store
            .find_one(Collection::Orders, &Filter::owned("u1", "x"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_requires_id() {
        let store = MemoryDocumentStore::new();
        let err = store
            .insert_one(Collection::Clients, json!({"name": "no id"}))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryDocumentStore::new();
        store
            .insert_one(Collection::Users, json!({"id": "1", "email": "a@b.co"}))
            .await
            .unwrap();
        let err = store
            .insert_one(Collection::Users, json!({"id": "2", "email": "a@b.co"}))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        // Case-sensitive: a differently cased address is a different account.
        store
            .insert_one(Collection::Users, json!({"id": "3", "email": "A@b.co"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_other_fields() {
        let store = MemoryDocumentStore::new();
        store
            .insert_one(
                Collection::Orders,
                json!({"id": "o1", "userId": "u1", "status": "New", "notes": "x"}),
            )
            .await
            .unwrap();

        let mut patch = Map::new();
        patch.insert("status".into(), json!("Delivered"));
        patch.insert("notes".into(), Value::Null);
        let updated = store
            .update_one(Collection::Orders, &Filter::owned("u1", "o1"), patch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated["status"], "Delivered");
        assert_eq!(updated["notes"], Value::Null);
        assert_eq!(updated["userId"], "u1");
    }

    #[tokio::test]
    async fn test_update_and_delete_respect_owner() {
        let store = MemoryDocumentStore::new();
        store
            .insert_one(Collection::Recipes, json!({"id": "r1", "userId": "u1"}))
            .await
            .unwrap();

        let updated = store
            .update_one(Collection::Recipes, &Filter::owned("u2", "r1"), Map::new())
            .await
            .unwrap();
        assert!(updated.is_none());

        assert!(
            !store
                .delete_one(Collection::Recipes, &Filter::owned("u2", "r1"))
                .await
                .unwrap()
        );
        assert!(
            store
                .delete_one(Collection::Recipes, &Filter::owned("u1", "r1"))
                .await
                .unwrap()
        );
        assert!(
            !store
                .delete_one(Collection::Recipes, &Filter::owned("u1", "r1"))
                .await
                .unwrap()
        );
    }
}
