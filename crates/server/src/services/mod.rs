//! Business logic services for Sugarbook.
//!
//! # Services
//!
//! - `auth` - signup, login and bearer token resolution
//! - `token` - JWT issue and validation
//! - `profile` - profile edits and avatar
//! - `uploads` - image files on disk
//! - `costing` - recipe cost rollup
//! - `orders` - orders and their client snapshot
//! - `dashboard` - time-windowed statistics
//!
//! Plain create/list/replace/delete of clients, ingredients and recipes goes
//! straight through [`crate::db::OwnedRepository`].

pub mod auth;
pub mod costing;
pub mod dashboard;
pub mod orders;
pub mod profile;
pub mod token;
pub mod uploads;

use thiserror::Error;

use crate::db::RepositoryError;
use uploads::UploadError;

/// Errors shared by the owner-scoped services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The record is absent or owned by someone else. Holds the entity name.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Repository/database error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Upload error.
    #[error(transparent)]
    Upload(#[from] UploadError),
}
