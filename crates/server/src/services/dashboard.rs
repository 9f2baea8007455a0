//! Dashboard statistics.
//!
//! Creation times are parsed and compared as instants. A record whose
//! `createdAt` does not parse falls outside every window. Due dates are
//! ordered as plain text.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tracing::instrument;

use sugarbook_core::{Period, UserId, parse_timestamp};

use super::ServiceError;
use crate::db::{DocumentStore, OwnedRepository};
use crate::models::{Client, Order};

/// Window for `recentActivities`, whatever the period.
const RECENT_ACTIVITY_DAYS: i64 = 7;

/// Window for `newClients`, whatever the period.
const NEW_CLIENT_DAYS: i64 = 30;

/// How many upcoming orders are listed.
const UPCOMING_LIMIT: usize = 5;

/// Aggregated figures for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of delivered orders created within the period.
    pub total_revenue: f64,
    pub total_clients: usize,
    /// Clients created in the last 30 days.
    pub new_clients: usize,
    /// Orders that are `New` or `In Progress`.
    pub active_orders: usize,
    /// Orders created in the last 7 days.
    pub recent_activities: usize,
    /// First five open orders by `dueDate`.
    pub upcoming_orders: Vec<Order>,
}

fn created_since(created_at: &str, start: DateTime<Utc>) -> bool {
    parse_timestamp(created_at).is_some_and(|at| at >= start)
}

/// Compute the dashboard from `owner`'s orders and clients as of `now`.
#[must_use]
pub fn compute_stats(
    orders: Vec<Order>,
    clients: &[Client],
    period: Period,
    now: DateTime<Utc>,
) -> DashboardStats {
    let period_start = now - period.window();
    let recent_start = now - TimeDelta::days(RECENT_ACTIVITY_DAYS);
    let new_client_start = now - TimeDelta::days(NEW_CLIENT_DAYS);

    let total_revenue = orders
        .iter()
        .filter(|o| o.status.is_delivered() && created_since(&o.created_at, period_start))
        .map(|o| o.total)
        .fold(0.0, |acc, total| acc + total);
    let active_orders = orders.iter().filter(|o| o.status.is_active()).count();
    let recent_activities = orders
        .iter()
        .filter(|o| created_since(&o.created_at, recent_start))
        .count();
    let new_clients = clients
        .iter()
        .filter(|c| created_since(&c.created_at, new_client_start))
        .count();

    let mut upcoming_orders: Vec<Order> = orders
        .into_iter()
        .filter(|o| !o.status.is_closed())
        .collect();
    upcoming_orders.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    upcoming_orders.truncate(UPCOMING_LIMIT);

    DashboardStats {
        total_revenue,
        total_clients: clients.len(),
        new_clients,
        active_orders,
        recent_activities,
        upcoming_orders,
    }
}

/// Loads a user's records and aggregates them.
pub struct DashboardService<'a> {
    orders: OwnedRepository<'a, Order>,
    clients: OwnedRepository<'a, Client>,
}

impl<'a> DashboardService<'a> {
    #[must_use]
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            orders: OwnedRepository::new(store),
            clients: OwnedRepository::new(store),
        }
    }

    /// Dashboard for `owner` over `period`, as of now.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    #[instrument(skip(self), fields(user_id = %owner))]
    pub async fn stats(&self, owner: &UserId, period: Period) -> Result<DashboardStats, ServiceError> {
        let orders = self.orders.list(owner).await?;
        let clients = self.clients.list(owner).await?;
        Ok(compute_stats(orders, &clients, period, Utc::now()))
    }
}
