//! Health and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::HasServices;

/// GET /health — liveness.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /ready — readiness, gated on the backing store answering a ping.
pub async fn ready<S: HasServices>(State(state): State<S>) -> (StatusCode, Json<Value>) {
    if state.check_ready().await {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not ready" })),
        )
    }
}
