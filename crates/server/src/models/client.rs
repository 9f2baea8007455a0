//! Client roster entries.

use serde::{Deserialize, Serialize};

use sugarbook_core::{ClientId, UserId, now_timestamp};

use crate::db::{Collection, OwnedDocument};

/// A customer of the user's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub user_id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: String,
}

impl Client {
    /// Build a new client record owned by `owner`.
    #[must_use]
    pub fn new(owner: UserId, draft: ClientDraft) -> Self {
        Self {
            id: ClientId::generate(),
            user_id: owner,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            created_at: now_timestamp(),
        }
    }
}

/// Creation and full-replace shape. Omitted optionals are written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl OwnedDocument for Client {
    type Id = ClientId;
    const COLLECTION: Collection = Collection::Clients;
    const ENTITY: &'static str = "Client";
}
