//! HTTP API layer
//!
//! Handlers are generic over [`HasServices`] and stay thin: extract,
//! authorize, delegate to a service, shape the response.

pub mod analytics;
pub mod auth;
pub mod cart;
pub mod health;
pub mod menu;
pub mod payment;
pub mod review;
pub mod user;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::policy;
use crate::state::HasServices;

/// Second stage of the access gate: the verified caller must hold the
/// admin role in the user directory.
pub(crate) async fn require_admin<S: HasServices>(state: &S, user: &AuthUser) -> Result<()> {
    let role = state.user_service().role_of(&user.email).await?;
    policy::ensure_admin(role)
}

/// Build the API router. State is attached by the caller.
pub fn router<S: HasServices>() -> Router<S> {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready::<S>))
        .route("/jwt", post(auth::issue_token::<S>))
        .route("/users", get(user::list_users::<S>))
        .route("/users", post(user::register::<S>))
        .route("/users/admin/{email}", get(user::admin_status::<S>))
        .route("/users/{email}", patch(user::promote::<S>))
        .route("/users/{email}", delete(user::remove::<S>))
        .route("/menu", get(menu::list_menu::<S>))
        .route("/menu", post(menu::create_menu_item::<S>))
        .route("/menu/{id}", get(menu::get_menu_item::<S>))
        .route("/menu/{id}", patch(menu::update_menu_item::<S>))
        .route("/menu/{id}", delete(menu::delete_menu_item::<S>))
        .route("/reviews", get(review::list_reviews::<S>))
        .route("/carts", get(cart::list_cart::<S>))
        .route("/carts", post(cart::add_cart_item::<S>))
        .route("/carts/{id}", delete(cart::remove_cart_item::<S>))
        .route(
            "/create-payment-intent",
            post(payment::create_payment_intent::<S>),
        )
        .route("/payments/{email}", get(payment::payment_history::<S>))
        .route("/payments", post(payment::settle::<S>))
        .route("/admin-stats", get(analytics::admin_stats::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
