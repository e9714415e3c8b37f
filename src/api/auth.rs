//! Token issuance endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::state::HasServices;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    /// Any additional fields ride along as extra claims
    #[serde(flatten)]
    pub extra: Option<HashMap<String, Value>>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /jwt — mint a bearer token for the given identity.
pub async fn issue_token<S: HasServices>(
    State(state): State<S>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>> {
    if request.email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    let token = state.jwt_manager().issue(&request.email, request.extra)?;
    Ok(Json(TokenResponse { token }))
}
