//! Domain models for Bistro Core

pub mod cart;
pub mod menu;
pub mod payment;
pub mod review;
pub mod user;

pub use cart::*;
pub use menu::*;
pub use payment::*;
pub use review::*;
pub use user::*;
