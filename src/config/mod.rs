//! Configuration management for Bistro Core

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Payment processor configuration
    pub stripe: StripeConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub url: String,
    /// Database name holding the menu/users/reviews/carts/payments collections
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds. Default is 7 days.
    pub token_ttl_secs: i64,
}

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    /// API base URL; overridable so tests can point at a local mock server
    pub api_base: String,
    /// Currency used when a request does not name one
    pub default_currency: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                name: env::var("DATABASE_NAME").unwrap_or_else(|_| "BistroDB".to_string()),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").context("JWT_SECRET is required")?,
                token_ttl_secs: env::var("JWT_TOKEN_TTL_SECS")
                    .unwrap_or_else(|_| "604800".to_string())
                    .parse()
                    .unwrap_or(604_800),
            },
            stripe: StripeConfig {
                secret_key: env::var("STRIPE_SECRET_KEY").context("STRIPE_SECRET_KEY is required")?,
                api_base: env::var("STRIPE_API_BASE")
                    .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
                default_currency: env::var("STRIPE_DEFAULT_CURRENCY")
                    .unwrap_or_else(|_| "usd".to_string()),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
