//! HTTP server wiring: concrete state, startup and graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{
    CartRepositoryImpl, MenuRepositoryImpl, PaymentRepositoryImpl, ReviewRepositoryImpl,
    UserRepositoryImpl,
};
use crate::service::{
    AnalyticsService, CartService, MenuService, ReviewService, SettlementService, UserService,
};
use crate::state::HasServices;
use crate::stripe::StripeClient;

struct Inner {
    config: Config,
    jwt_manager: JwtManager,
    user_service: UserService<UserRepositoryImpl>,
    menu_service: MenuService<MenuRepositoryImpl>,
    review_service: ReviewService<ReviewRepositoryImpl>,
    cart_service: CartService<CartRepositoryImpl>,
    settlement_service: SettlementService<PaymentRepositoryImpl, CartRepositoryImpl>,
    analytics_service:
        AnalyticsService<UserRepositoryImpl, MenuRepositoryImpl, PaymentRepositoryImpl>,
    stripe: StripeClient,
    db: Database,
}

/// Production application state. Cheap to clone; everything lives behind
/// one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let users = Arc::new(UserRepositoryImpl::new(&db));
        let menu = Arc::new(MenuRepositoryImpl::new(&db));
        let reviews = Arc::new(ReviewRepositoryImpl::new(&db));
        let carts = Arc::new(CartRepositoryImpl::new(&db));
        let payments = Arc::new(PaymentRepositoryImpl::new(&db));

        let jwt_manager = JwtManager::new(config.jwt.clone());
        let stripe = StripeClient::new(&config.stripe);

        let inner = Inner {
            jwt_manager,
            user_service: UserService::new(users.clone()),
            menu_service: MenuService::new(menu.clone()),
            review_service: ReviewService::new(reviews),
            cart_service: CartService::new(carts.clone()),
            settlement_service: SettlementService::new(
                payments.clone(),
                carts,
                config.stripe.default_currency.clone(),
            ),
            analytics_service: AnalyticsService::new(users, menu, payments),
            stripe,
            db,
            config,
        };
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl HasServices for AppState {
    type UserRepo = UserRepositoryImpl;
    type MenuRepo = MenuRepositoryImpl;
    type ReviewRepo = ReviewRepositoryImpl;
    type CartRepo = CartRepositoryImpl;
    type PaymentRepo = PaymentRepositoryImpl;

    fn config(&self) -> &Config {
        &self.inner.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.inner.jwt_manager
    }

    fn user_service(&self) -> &UserService<Self::UserRepo> {
        &self.inner.user_service
    }

    fn menu_service(&self) -> &MenuService<Self::MenuRepo> {
        &self.inner.menu_service
    }

    fn review_service(&self) -> &ReviewService<Self::ReviewRepo> {
        &self.inner.review_service
    }

    fn cart_service(&self) -> &CartService<Self::CartRepo> {
        &self.inner.cart_service
    }

    fn settlement_service(&self) -> &SettlementService<Self::PaymentRepo, Self::CartRepo> {
        &self.inner.settlement_service
    }

    fn analytics_service(
        &self,
    ) -> &AnalyticsService<Self::UserRepo, Self::MenuRepo, Self::PaymentRepo> {
        &self.inner.analytics_service
    }

    fn payment_provider(&self) -> &StripeClient {
        &self.inner.stripe
    }

    async fn check_ready(&self) -> bool {
        self.inner
            .db
            .run_command(doc! { "ping": 1 })
            .await
            .is_ok()
    }
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let client = Client::with_uri_str(&config.database.url)
        .await
        .context("Failed to create MongoDB client")?;
    let db = client.database(&config.database.name);
    db.run_command(doc! { "ping": 1 })
        .await
        .context("Failed to reach MongoDB")?;
    tracing::info!(database = %config.database.name, "Connected to MongoDB");

    let addr = config.http_addr();
    let state = AppState::new(config, db);
    let app = api::router::<AppState>().with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    client.shutdown().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
