//! Customer review endpoints

use axum::{extract::State, Json};

use crate::domain::Review;
use crate::error::Result;
use crate::state::HasServices;

/// GET /reviews — public review listing.
pub async fn list_reviews<S: HasServices>(State(state): State<S>) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.review_service().list().await?))
}
