//! Orders and their client snapshot.

use serde::{Deserialize, Serialize};

use sugarbook_core::{ClientId, OrderId, OrderStatus, UserId, now_timestamp};

use super::Client;
use crate::db::{Collection, OwnedDocument};

/// Copy of the client's identity taken when the order is written.
///
/// Refreshed only when an order's `clientId` changes; renaming or deleting
/// the client leaves existing snapshots as they were.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSnapshot {
    pub id: ClientId,
    pub name: String,
}

impl From<&Client> for ClientSnapshot {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            name: client.name.clone(),
        }
    }
}

/// An order placed by one of the user's clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub client_id: ClientId,
    pub client: ClientSnapshot,
    pub item: String,
    /// ISO date string, compared as text.
    pub due_date: String,
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
}

impl Order {
    /// Build a new order for `client`, with status `New`.
    #[must_use]
    pub fn new(owner: UserId, client: &Client, draft: NewOrder) -> Self {
        Self {
            id: OrderId::generate(),
            user_id: owner,
            client_id: client.id.clone(),
            client: ClientSnapshot::from(client),
            item: draft.item,
            due_date: draft.due_date,
            total: draft.total,
            status: OrderStatus::default(),
            notes: draft.notes,
            created_at: now_timestamp(),
        }
    }
}

/// Creation shape. An absent `notes` is stored as `""`, an explicit `null`
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub client_id: ClientId,
    pub item: String,
    pub due_date: String,
    pub total: f64,
    #[serde(default = "empty_notes")]
    pub notes: Option<String>,
}

#[allow(clippy::unnecessary_wraps)]
fn empty_notes() -> Option<String> {
    Some(String::new())
}

/// Partial update. Absent and `null` fields both mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Filled in by the server when `client_id` is supplied.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientSnapshot>,
}

impl OwnedDocument for Order {
    type Id = OrderId;
    const COLLECTION: Collection = Collection::Orders;
    const ENTITY: &'static str = "Order";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_notes_absent_vs_null() {
        let absent: NewOrder = serde_json::from_value(json!({
            "clientId": "c1", "item": "Cake", "dueDate": "2026-05-01", "total": 120.0
        }))
        .unwrap();
        assert_eq!(absent.notes.as_deref(), Some(""));

        let null: NewOrder = serde_json::from_value(json!({
            "clientId": "c1", "item": "Cake", "dueDate": "2026-05-01", "total": 120.0,
            "notes": null
        }))
        .unwrap();
        assert_eq!(null.notes, None);
    }

    #[test]
    fn test_patch_serializes_only_supplied_fields() {
        let patch: OrderPatch = serde_json::from_value(json!({
            "status": "In Progress",
            "notes": null,
            "client": {"id": "forged", "name": "forged"}
        }))
        .unwrap();
        assert!(patch.client.is_none());

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"status": "In Progress"}));
    }
}
