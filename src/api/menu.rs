//! Menu catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::require_admin;
use crate::domain::{CreateMenuItemInput, MenuItem, UpdateMenuItemInput};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;

/// GET /menu — public catalog listing.
pub async fn list_menu<S: HasServices>(State(state): State<S>) -> Result<Json<Vec<MenuItem>>> {
    Ok(Json(state.menu_service().list().await?))
}

/// GET /menu/{id} — public single-item lookup. An id that matches nothing
/// responds with a JSON `null`, not a 404.
pub async fn get_menu_item<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<Json<Option<MenuItem>>> {
    Ok(Json(state.menu_service().get(&id).await?))
}

/// POST /menu — add a catalog item, admin only.
pub async fn create_menu_item<S: HasServices>(
    State(state): State<S>,
    user: AuthUser,
    Json(input): Json<CreateMenuItemInput>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    require_admin(&state, &user).await?;
    let item = state.menu_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /menu/{id} — partial update, admin only.
pub async fn update_menu_item<S: HasServices>(
    State(state): State<S>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateMenuItemInput>,
) -> Result<StatusCode> {
    require_admin(&state, &user).await?;
    state.menu_service().update(&id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /menu/{id} — remove a catalog item, admin only.
pub async fn delete_menu_item<S: HasServices>(
    State(state): State<S>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    require_admin(&state, &user).await?;
    state.menu_service().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
