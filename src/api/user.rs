//! User directory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::require_admin;
use crate::domain::{CreateUserInput, Registration, User};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::policy;
use crate::state::HasServices;

#[derive(Debug, Serialize)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

/// GET /users — directory listing, admin only.
pub async fn list_users<S: HasServices>(
    State(state): State<S>,
    user: AuthUser,
) -> Result<Json<Vec<User>>> {
    require_admin(&state, &user).await?;
    Ok(Json(state.user_service().list().await?))
}

/// POST /users — idempotent registration. A repeat registration is
/// acknowledged without creating a duplicate.
pub async fn register<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CreateUserInput>,
) -> Result<Response> {
    match state.user_service().register(input).await? {
        Registration::Created(user) => Ok((StatusCode::CREATED, Json(user)).into_response()),
        Registration::AlreadyExists => Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "User already exists" })),
        )
            .into_response()),
    }
}

/// GET /users/admin/{email} — whether the caller holds the admin role.
/// Callers may only ask about themselves.
pub async fn admin_status<S: HasServices>(
    State(state): State<S>,
    user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>> {
    policy::ensure_self(&user, &email)?;
    let role = state.user_service().role_of(&email).await?;
    Ok(Json(AdminStatusResponse {
        admin: role.is_admin(),
    }))
}

/// PATCH /users/admin/{email} — grant the admin role, admin only.
pub async fn promote<S: HasServices>(
    State(state): State<S>,
    user: AuthUser,
    Path(email): Path<String>,
) -> Result<StatusCode> {
    require_admin(&state, &user).await?;
    state.user_service().promote(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/{email} — remove a directory entry, admin only.
pub async fn remove<S: HasServices>(
    State(state): State<S>,
    user: AuthUser,
    Path(email): Path<String>,
) -> Result<StatusCode> {
    require_admin(&state, &user).await?;
    state.user_service().remove(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}
