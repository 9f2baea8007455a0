//! Order handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use sugarbook_core::OrderId;

use super::owned::Deleted;
use crate::db::OwnedDocument;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{NewOrder, Order, OrderPatch};
use crate::services::orders::OrderService;
use crate::state::AppState;

/// List the caller's orders, latest due date first.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderService::new(state.store()).list(&user.id).await?;
    Ok(Json(orders))
}

/// Create an order for one of the caller's clients.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(draft): Json<NewOrder>,
) -> Result<Json<Order>> {
    let order = OrderService::new(state.store())
        .create(&user.id, draft)
        .await?;
    Ok(Json(order))
}

/// Apply a partial patch. A new `clientId` refreshes the client snapshot.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
    Json(patch): Json<OrderPatch>,
) -> Result<Json<Order>> {
    let order = OrderService::new(state.store())
        .update(&user.id, &id, patch)
        .await?;
    Ok(Json(order))
}

pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<Deleted>> {
    OrderService::new(state.store())
        .delete(&user.id, &id)
        .await?;
    Ok(Json(Deleted {
        message: format!("{} deleted", Order::ENTITY),
    }))
}
