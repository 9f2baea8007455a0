//! Dashboard statistics handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use sugarbook_core::Period;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::dashboard::{DashboardService, DashboardStats};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub period: Option<String>,
}

/// Dashboard figures. Unknown or missing `period` values mean a month.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<StatsQuery>,
) -> Result<Json<DashboardStats>> {
    let period = query
        .period
        .as_deref()
        .map_or_else(Period::default, Period::from_query);
    let stats = DashboardService::new(state.store())
        .stats(&user.id, period)
        .await?;
    Ok(Json(stats))
}
