//! Access tokens.
//!
//! HS256 JWTs whose subject is the user id and which expire seven days after
//! issue. The signing secret is loaded once at startup.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sugarbook_core::UserId;

/// How long an issued token stays valid.
pub const TOKEN_VALIDITY_DAYS: i64 = 7;

/// Errors from issuing or validating tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The `exp` claim has passed.
    #[error("token expired")]
    Expired,

    /// Bad signature, malformed token or wrong algorithm.
    #[error("invalid token")]
    Invalid,

    /// The token verified but carries no subject.
    #[error("token has no subject")]
    MissingSubject,

    /// The token could not be signed.
    #[error("token encoding failed: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    exp: i64,
}

/// Issues and validates access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

impl TokenService {
    /// Create a token service signing with `secret`.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
        }
    }

    /// Issue a token for `user`, valid for [`TOKEN_VALIDITY_DAYS`].
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue(&self, user: &UserId) -> Result<String, TokenError> {
        self.issue_at(user, Utc::now())
    }

    fn issue_at(&self, user: &UserId, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: Some(user.to_string()),
            exp: (issued_at + TimeDelta::days(TOKEN_VALIDITY_DAYS)).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(TokenError::Encoding)
    }

    /// Verify `token` and return its subject.
    ///
    /// Does not check that the user still exists; callers resolve the
    /// subject against the user directory.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired`, `TokenError::Invalid` or
    /// `TokenError::MissingSubject`.
    pub fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        data.claims
            .sub
            .filter(|sub| !sub.is_empty())
            .map(UserId::new)
            .ok_or(TokenError::MissingSubject)
    }
}
