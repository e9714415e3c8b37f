//! Data access layer (Repository pattern)
//!
//! Each collection of the document store is consumed through a trait so that
//! services can be unit-tested against mocks. Implementations hold a typed
//! `Collection` handle cloned from the injected `Database`.

pub mod cart;
pub mod menu;
pub mod payment;
pub mod review;
pub mod user;

pub use cart::{CartRepository, CartRepositoryImpl};
pub use menu::{MenuRepository, MenuRepositoryImpl};
pub use payment::{PaymentRepository, PaymentRepositoryImpl};
pub use review::{ReviewRepository, ReviewRepositoryImpl};
pub use user::{UserRepository, UserRepositoryImpl};

#[cfg(test)]
pub use cart::MockCartRepository;
#[cfg(test)]
pub use menu::MockMenuRepository;
#[cfg(test)]
pub use payment::MockPaymentRepository;
#[cfg(test)]
pub use review::MockReviewRepository;
#[cfg(test)]
pub use user::MockUserRepository;

/// Collection names within the configured database
pub mod collections {
    pub const USERS: &str = "users";
    pub const MENU: &str = "menu";
    pub const REVIEWS: &str = "reviews";
    pub const CARTS: &str = "carts";
    pub const PAYMENTS: &str = "payments";
}
