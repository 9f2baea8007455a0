//! Authentication service.
//!
//! Password signup and login, and resolution of bearer tokens to users.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::Serialize;
use tracing::instrument;

use sugarbook_core::Email;

use crate::db::{DocumentStore, RepositoryError, UserRepository};
use crate::models::{StoredUser, User};
use crate::services::token::TokenService;

/// Token type reported alongside every issued token.
pub const TOKEN_TYPE: &str = "bearer";

/// A freshly issued access token and the user it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: User,
}

/// Authentication service.
///
/// Handles registration, login and token authentication.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(store: &'a dyn DocumentStore, tokens: &'a TokenService) -> Self {
        Self {
            users: UserRepository::new(store),
            tokens,
        }
    }

    /// Register a new user and issue their first token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    #[instrument(skip(self, name, password))]
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthError> {
        let email = Email::parse(email)?;

        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let stored = StoredUser {
            user: User::new(name.to_owned(), email),
            password: hash_password(password)?,
        };

        self.users.create(&stored).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::Repository(other),
        })?;

        tracing::info!(user_id = %stored.user.id, "user signed up");
        self.issue(stored.user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let email = Email::parse(email)?;

        let stored = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &stored.password)?;

        tracing::info!(user_id = %stored.user.id, "user logged in");
        self.issue(stored.user)
    }

    /// Resolve a bearer token to a live user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if the token does not validate.
    /// Returns `AuthError::UserNotFound` if its subject no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self.tokens.validate(token)?;
        self.users
            .get_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    fn issue(&self, user: User) -> Result<IssuedToken, AuthError> {
        Ok(IssuedToken {
            access_token: self.tokens.issue(&user.id)?,
            token_type: TOKEN_TYPE,
            user,
        })
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
