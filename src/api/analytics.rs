//! Admin dashboard endpoint

use axum::{extract::State, Json};

use crate::domain::AdminStats;
use crate::error::Result;
use crate::state::HasServices;

/// GET /admin-stats — dashboard counters and total revenue.
pub async fn admin_stats<S: HasServices>(State(state): State<S>) -> Result<Json<AdminStats>> {
    Ok(Json(state.analytics_service().snapshot().await?))
}
