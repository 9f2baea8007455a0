//! Order lifecycle.
//!
//! Orders embed a snapshot of their client. The snapshot is taken on create
//! and whenever a patch supplies `clientId`; nothing else refreshes it.

use tracing::instrument;

use sugarbook_core::{ClientId, OrderId, UserId};

use super::ServiceError;
use crate::db::{DocumentStore, OwnedDocument, OwnedRepository};
use crate::models::{Client, ClientSnapshot, NewOrder, Order, OrderPatch};

/// Owner-scoped order operations.
pub struct OrderService<'a> {
    orders: OwnedRepository<'a, Order>,
    clients: OwnedRepository<'a, Client>,
}

impl<'a> OrderService<'a> {
    #[must_use]
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            orders: OwnedRepository::new(store),
            clients: OwnedRepository::new(store),
        }
    }

    /// All of `owner`'s orders, latest `dueDate` first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list(&self, owner: &UserId) -> Result<Vec<Order>, ServiceError> {
        let mut orders = self.orders.list(owner).await?;
        orders.sort_by(|a, b| b.due_date.cmp(&a.due_date));
        Ok(orders)
    }

    /// Create an order for one of `owner`'s clients.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the client is not owned by `owner`.
    #[instrument(skip(self, draft), fields(user_id = %owner, client_id = %draft.client_id))]
    pub async fn create(&self, owner: &UserId, draft: NewOrder) -> Result<Order, ServiceError> {
        let client = self.resolve_client(owner, &draft.client_id).await?;
        let order = Order::new(owner.clone(), &client, draft);
        self.orders.insert(&order).await?;

        tracing::info!(order_id = %order.id, "order created");
        Ok(order)
    }

    /// Apply a partial patch.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` naming the client if a supplied
    /// `clientId` does not resolve, or naming the order if the order is not
    /// owned by `owner`.
    #[instrument(skip(self, patch), fields(user_id = %owner, order_id = %id))]
    pub async fn update(
        &self,
        owner: &UserId,
        id: &OrderId,
        mut patch: OrderPatch,
    ) -> Result<Order, ServiceError> {
        patch.client = match &patch.client_id {
            Some(client_id) => Some(ClientSnapshot::from(
                &self.resolve_client(owner, client_id).await?,
            )),
            None => None,
        };

        self.orders
            .update(owner, id, &patch)
            .await?
            .ok_or(ServiceError::NotFound(Order::ENTITY))
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the order is not owned by `owner`.
    pub async fn delete(&self, owner: &UserId, id: &OrderId) -> Result<(), ServiceError> {
        if self.orders.delete(owner, id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound(Order::ENTITY))
        }
    }

    async fn resolve_client(&self, owner: &UserId, id: &ClientId) -> Result<Client, ServiceError> {
        self.clients
            .get(owner, id)
            .await?
            .ok_or(ServiceError::NotFound(Client::ENTITY))
    }
}
