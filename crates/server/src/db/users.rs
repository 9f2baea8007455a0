//! User repository.
//!
//! Users are the one collection that is not owner-scoped: they are looked up
//! by their own id (token subject) or by email (login).

use serde_json::{Map, Value};

use sugarbook_core::{Email, UserId};

use super::{Collection, DocumentStore, Filter, RepositoryError, decode, encode, encode_patch, fields};
use crate::models::{StoredUser, User, UserPatch};

/// Repository for user documents.
pub struct UserRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored document is invalid.
    pub async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let filter = Filter::new().where_eq(fields::ID, id.as_str());
        self.store
            .find_one(Collection::Users, &filter)
            .await?
            .map(|document| decode(Collection::Users, document))
            .transpose()
    }

    /// Get a user and their password hash by email address.
    ///
    /// The match is exact: `Ana@example.com` and `ana@example.com` are
    /// different accounts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored document is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<StoredUser>, RepositoryError> {
        let filter = Filter::new().where_eq(fields::EMAIL, email.as_str());
        self.store
            .find_one(Collection::Users, &filter)
            .await?
            .map(|document| decode(Collection::Users, document))
            .transpose()
    }

    /// Store a new user with their password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub async fn create(&self, user: &StoredUser) -> Result<(), RepositoryError> {
        let document = encode(Collection::Users, user)?;
        self.store.insert_one(Collection::Users, document).await
    }

    /// Apply a profile patch and return the updated user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user no longer exists.
    pub async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, RepositoryError> {
        let patch = encode_patch(Collection::Users, patch)?;
        self.merge(id, patch).await
    }

    /// Record the avatar URL on the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user no longer exists.
    pub async fn set_avatar(&self, id: &UserId, avatar_url: &str) -> Result<User, RepositoryError> {
        let mut patch = Map::new();
        patch.insert("avatar".to_owned(), Value::String(avatar_url.to_owned()));
        self.merge(id, patch).await
    }

    async fn merge(&self, id: &UserId, patch: Map<String, Value>) -> Result<User, RepositoryError> {
        let filter = Filter::new().where_eq(fields::ID, id.as_str());
        let document = self
            .store
            .update_one(Collection::Users, &filter, patch)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        decode(Collection::Users, document)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryDocumentStore;

    fn stored(email: &str) -> StoredUser {
        StoredUser {
            user: User::new("Ana".to_owned(), Email::parse(email).unwrap()),
            password: "hash".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = MemoryDocumentStore::new();
        let repo = UserRepository::new(&store);
        let ana = stored("ana@example.com");
        repo.create(&ana).await.unwrap();

        let by_id = repo.get_by_id(&ana.user.id).await.unwrap().unwrap();
        assert_eq!(by_id, ana.user);

        let by_email = repo
            .get_by_email(&Email::parse("ana@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.password, "hash");

        let other_case = repo
            .get_by_email(&Email::parse("Ana@example.com").unwrap())
            .await
            .unwrap();
        assert!(other_case.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = MemoryDocumentStore::new();
        let repo = UserRepository::new(&store);
        repo.create(&stored("ana@example.com")).await.unwrap();

        let err = repo.create(&stored("ana@example.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_patch_leaves_unsupplied_fields() {
        let store = MemoryDocumentStore::new();
        let repo = UserRepository::new(&store);
        let ana = stored("ana@example.com");
        repo.create(&ana).await.unwrap();

        let patch = UserPatch {
            name: None,
            theme: Some("dark".to_owned()),
        };
        let updated = repo.update(&ana.user.id, &patch).await.unwrap();
        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.theme, "dark");

        // The hash survives profile edits.
        let again = repo
            .get_by_email(&ana.user.email)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again.password, "hash");
    }

    #[tokio::test]
    async fn test_set_avatar_on_missing_user() {
        let store = MemoryDocumentStore::new();
        let repo = UserRepository::new(&store);
        let err = repo
            .set_avatar(&UserId::new("ghost"), "/uploads/avatar_ghost.png")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
