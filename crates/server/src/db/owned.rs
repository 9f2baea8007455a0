//! Repository for owner-scoped collections.
//!
//! Clients, ingredients, recipes and orders all follow one contract: every
//! read and write is filtered by `(id, userId)`, so a record owned by another
//! user is indistinguishable from one that does not exist.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use sugarbook_core::UserId;

use super::{Collection, DocumentStore, Filter, RepositoryError, decode, encode, encode_patch};

/// An entity stored in an owner-scoped collection.
pub trait OwnedDocument: Serialize + DeserializeOwned + Send + Sync {
    /// Typed identifier of the entity.
    type Id: AsRef<str> + Send + Sync;

    /// Collection the entity lives in.
    const COLLECTION: Collection;

    /// Human-readable entity name, used in "not found" messages.
    const ENTITY: &'static str;
}

/// Typed access to one owner-scoped collection.
pub struct OwnedRepository<'a, T> {
    store: &'a dyn DocumentStore,
    entity: PhantomData<fn() -> T>,
}

impl<'a, T: OwnedDocument> OwnedRepository<'a, T> {
    /// Create a new repository over `store`.
    #[must_use]
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            entity: PhantomData,
        }
    }

    /// All records owned by `owner`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored record does not decode.
    pub async fn list(&self, owner: &UserId) -> Result<Vec<T>, RepositoryError> {
        self.store
            .find(T::COLLECTION, &Filter::owned_by(owner.as_str()))
            .await?
            .into_iter()
            .map(|document| decode(T::COLLECTION, document))
            .collect()
    }

    /// The record `id` if it is owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored record does not decode.
    pub async fn get(&self, owner: &UserId, id: &T::Id) -> Result<Option<T>, RepositoryError> {
        let filter = Filter::owned(owner.as_str(), id.as_ref());
        self.store
            .find_one(T::COLLECTION, &filter)
            .await?
            .map(|document| decode(T::COLLECTION, document))
            .transpose()
    }

    /// Store a new record. The record must already carry its id and owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id is already taken.
    pub async fn insert(&self, entity: &T) -> Result<(), RepositoryError> {
        let document = encode(T::COLLECTION, entity)?;
        self.store.insert_one(T::COLLECTION, document).await
    }

    /// Merge `changes` into the record `id` owned by `owner`.
    ///
    /// Every field `changes` serializes overwrites the stored one; fields it
    /// skips are left alone. Creation shapes therefore act as a full replace
    /// and `skip_serializing_if` patch shapes as a partial patch.
    ///
    /// Returns `None` when no such record is owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    /// Returns `RepositoryError::DataCorruption` if the merged record does not decode.
    pub async fn update<P>(
        &self,
        owner: &UserId,
        id: &T::Id,
        changes: &P,
    ) -> Result<Option<T>, RepositoryError>
    where
        P: Serialize + Sync,
    {
        let patch = encode_patch(T::COLLECTION, changes)?;
        let filter = Filter::owned(owner.as_str(), id.as_ref());
        self.store
            .update_one(T::COLLECTION, &filter, patch)
            .await?
            .map(|document| decode(T::COLLECTION, document))
            .transpose()
    }

    /// Delete the record `id` owned by `owner`. Returns `false` if there was
    /// nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, owner: &UserId, id: &T::Id) -> Result<bool, RepositoryError> {
        let filter = Filter::owned(owner.as_str(), id.as_ref());
        self.store.delete_one(T::COLLECTION, &filter).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sugarbook_core::ClientId;

    use super::*;
    use crate::db::MemoryDocumentStore;
    use crate::models::{Client, ClientDraft};

    fn client(owner: &UserId, name: &str) -> Client {
        Client::new(
            owner.clone(),
            ClientDraft {
                name: name.to_owned(),
                email: Some("ana@example.com".to_owned()),
                phone: None,
            },
        )
    }

    #[tokio::test]
    async fn test_list_only_returns_owned_records() {
        let store = MemoryDocumentStore::new();
        let repo = OwnedRepository::<Client>::new(&store);
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        repo.insert(&client(&alice, "Ana")).await.unwrap();
        repo.insert(&client(&bob, "Bruno")).await.unwrap();
        repo.insert(&client(&alice, "Carla")).await.unwrap();

        let names: Vec<_> = repo
            .list(&alice)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Ana", "Carla"]);
    }

    #[tokio::test]
    async fn test_full_replace_clears_omitted_optionals() {
        let store = MemoryDocumentStore::new();
        let repo = OwnedRepository::<Client>::new(&store);
        let owner = UserId::new("alice");
        let original = client(&owner, "Ana");
        repo.insert(&original).await.unwrap();

        let draft = ClientDraft {
            name: "Ana Maria".to_owned(),
            email: None,
            phone: Some("555".to_owned()),
        };
        let updated = repo
            .update(&owner, &original.id, &draft)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.email, None);
        assert_eq!(updated.phone.as_deref(), Some("555"));
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.user_id, owner);
    }

    #[tokio::test]
    async fn test_foreign_records_look_missing() {
        let store = MemoryDocumentStore::new();
        let repo = OwnedRepository::<Client>::new(&store);
        let alice = UserId::new("alice");
        let mallory = UserId::new("mallory");
        let record = client(&alice, "Ana");
        repo.insert(&record).await.unwrap();

        assert!(repo.get(&mallory, &record.id).await.unwrap().is_none());
        let draft = ClientDraft {
            name: "pwned".to_owned(),
            email: None,
            phone: None,
        };
        assert!(
            repo.update(&mallory, &record.id, &draft)
                .await
                .unwrap()
                .is_none()
        );
        assert!(!repo.delete(&mallory, &record.id).await.unwrap());

        let still_there = repo.get(&alice, &record.id).await.unwrap().unwrap();
        assert_eq!(still_there.name, "Ana");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryDocumentStore::new();
        let repo = OwnedRepository::<Client>::new(&store);
        let owner = UserId::new("alice");
        let missing = ClientId::new("nope");

        assert!(!repo.delete(&owner, &missing).await.unwrap());
        assert!(!repo.delete(&owner, &missing).await.unwrap());
    }
}
