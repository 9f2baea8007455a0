//! Handler bodies shared by the plain owner-scoped collections.
//!
//! Clients, ingredients and recipes differ only in their record and draft
//! types; listing, replacing and deleting work the same way for each.

use axum::Json;
use serde::Serialize;

use sugarbook_core::UserId;

use crate::db::{OwnedDocument, OwnedRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Acknowledgement returned by every delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: String,
}

pub(super) async fn list<T: OwnedDocument>(state: &AppState, owner: &UserId) -> Result<Json<Vec<T>>> {
    let records = OwnedRepository::<T>::new(state.store()).list(owner).await?;
    Ok(Json(records))
}

pub(super) async fn insert<T: OwnedDocument>(state: &AppState, record: T) -> Result<Json<T>> {
    OwnedRepository::<T>::new(state.store())
        .insert(&record)
        .await?;
    Ok(Json(record))
}

/// Overwrite every field `draft` carries. Unknown or foreign ids are a 404.
pub(super) async fn replace<T, D>(
    state: &AppState,
    owner: &UserId,
    id: &T::Id,
    draft: &D,
) -> Result<Json<T>>
where
    T: OwnedDocument,
    D: Serialize + Sync,
{
    OwnedRepository::<T>::new(state.store())
        .update(owner, id, draft)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(T::ENTITY))
}

pub(super) async fn delete<T: OwnedDocument>(
    state: &AppState,
    owner: &UserId,
    id: &T::Id,
) -> Result<Json<Deleted>> {
    if OwnedRepository::<T>::new(state.store())
        .delete(owner, id)
        .await?
    {
        Ok(Json(Deleted {
            message: format!("{} deleted", T::ENTITY),
        }))
    } else {
        Err(AppError::NotFound(T::ENTITY))
    }
}
