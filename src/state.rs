//! Application state abstraction.
//!
//! Handlers are generic over [`HasServices`] instead of a concrete state
//! struct, so router tests can swap in a state wired with mock
//! repositories while production uses [`crate::server::AppState`].

use std::future::Future;

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{
    CartRepository, MenuRepository, PaymentRepository, ReviewRepository, UserRepository,
};
use crate::service::{
    AnalyticsService, CartService, MenuService, ReviewService, SettlementService, UserService,
};
use crate::stripe::StripeClient;

/// Dependency surface required by the HTTP layer.
pub trait HasServices: Clone + Send + Sync + 'static {
    type UserRepo: UserRepository;
    type MenuRepo: MenuRepository;
    type ReviewRepo: ReviewRepository;
    type CartRepo: CartRepository;
    type PaymentRepo: PaymentRepository;

    fn config(&self) -> &Config;
    fn jwt_manager(&self) -> &JwtManager;
    fn user_service(&self) -> &UserService<Self::UserRepo>;
    fn menu_service(&self) -> &MenuService<Self::MenuRepo>;
    fn review_service(&self) -> &ReviewService<Self::ReviewRepo>;
    fn cart_service(&self) -> &CartService<Self::CartRepo>;
    fn settlement_service(&self) -> &SettlementService<Self::PaymentRepo, Self::CartRepo>;
    fn analytics_service(
        &self,
    ) -> &AnalyticsService<Self::UserRepo, Self::MenuRepo, Self::PaymentRepo>;
    fn payment_provider(&self) -> &StripeClient;

    /// Readiness probe: true when the backing store answers a ping.
    fn check_ready(&self) -> impl Future<Output = bool> + Send;
}
