//! Bistro Core - Restaurant ordering backend
//!
//! Catalog, cart, user-role and payment data over HTTP, backed by MongoDB
//! and a Stripe-style payment processor. The interesting parts live in
//! [`jwt`] (stateless bearer tokens), [`policy`] (role gating) and
//! [`service::settlement`] (the ledger-append / cart-cleanup saga).

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod policy;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod stripe;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
