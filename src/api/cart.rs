//! Cart endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{AddCartItemInput, CartItem};
use crate::error::Result;
use crate::state::HasServices;

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub deleted: bool,
}

/// GET /carts?email= — cart line-items for the given owner.
pub async fn list_cart<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<CartItem>>> {
    Ok(Json(state.cart_service().list_for(&query.email).await?))
}

/// POST /carts — add a line-item.
pub async fn add_cart_item<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<AddCartItemInput>,
) -> Result<(StatusCode, Json<CartItem>)> {
    let item = state.cart_service().add(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /carts/{id} — remove a line-item. Idempotent: deleting an id
/// that is already gone reports `deleted: false`.
pub async fn remove_cart_item<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<Json<RemovedResponse>> {
    let deleted = state.cart_service().remove(&id).await?;
    Ok(Json(RemovedResponse { deleted }))
}
