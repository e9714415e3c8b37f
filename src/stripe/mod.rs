//! Stripe payment-intent client.
//!
//! Small wrapper over the REST endpoint the checkout flow needs. The base
//! URL is configurable so tests can point it at a local mock server.

use crate::config::StripeConfig;
use crate::error::{AppError, Result};
use serde::Deserialize;

/// Converts a major-unit amount (e.g. dollars) to the minor units the
/// provider expects (e.g. cents). Rounded, not truncated: 12.34 has no
/// exact binary representation and truncation would yield 1233.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// A created payment intent, reduced to the fields the client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        }
    }

    /// Creates a card payment intent for the given major-unit amount.
    pub async fn create_payment_intent(
        &self,
        amount: f64,
        currency: &str,
    ) -> Result<PaymentIntent> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let minor_units = to_minor_units(amount);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", minor_units.to_string()),
                ("currency", currency.to_string()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::PaymentProvider(format!(
                "Payment intent creation failed with status {status}: {body}"
            )));
        }

        response
            .json::<PaymentIntent>()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Invalid response body: {e}")))
    }
}
