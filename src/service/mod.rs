//! Business logic services. Each service is generic over the repository
//! traits it needs, which keeps the logic testable against mocks.

pub mod analytics;
pub mod cart;
pub mod menu;
pub mod review;
pub mod settlement;
pub mod user;

pub use analytics::AnalyticsService;
pub use cart::CartService;
pub use menu::MenuService;
pub use review::ReviewService;
pub use settlement::{CleanupReport, SettlementOutcome, SettlementService};
pub use user::UserService;
