//! Self-service profile: name, theme and avatar.

use tracing::instrument;

use sugarbook_core::UserId;

use super::ServiceError;
use super::uploads::UploadStore;
use crate::db::{DocumentStore, RepositoryError, UserRepository};
use crate::models::{User, UserPatch};

/// Profile operations for the authenticated user.
pub struct ProfileService<'a> {
    users: UserRepository<'a>,
    uploads: &'a UploadStore,
}

impl<'a> ProfileService<'a> {
    #[must_use]
    pub fn new(store: &'a dyn DocumentStore, uploads: &'a UploadStore) -> Self {
        Self {
            users: UserRepository::new(store),
            uploads,
        }
    }

    /// Apply a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the account vanished meanwhile.
    #[instrument(skip(self), fields(user_id = %user))]
    pub async fn update(&self, user: &UserId, patch: &UserPatch) -> Result<User, ServiceError> {
        self.users.update(user, patch).await.map_err(user_not_found)
    }

    /// Store a new avatar image and point the account at it.
    ///
    /// Returns the avatar's public URL.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Upload` if the file cannot be written.
    /// Returns `ServiceError::NotFound` if the account vanished meanwhile.
    #[instrument(skip(self, bytes), fields(user_id = %user))]
    pub async fn set_avatar(
        &self,
        user: &UserId,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, ServiceError> {
        let url = self.uploads.save_avatar(user, original_name, bytes).await?;
        self.users
            .set_avatar(user, &url)
            .await
            .map_err(user_not_found)?;
        Ok(url)
    }
}

fn user_not_found(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound("User"),
        other => ServiceError::Repository(other),
    }
}
