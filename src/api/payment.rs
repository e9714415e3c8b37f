//! Payment endpoints: intent creation against the processor, settlement
//! into the ledger, and per-user history.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Payment, SettlePaymentInput};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::policy;
use crate::service::SettlementOutcome;
use crate::state::HasServices;

#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    /// Major-unit amount; `price` accepted as a legacy field name
    #[serde(alias = "price")]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// POST /create-payment-intent — ask the processor for a client secret
/// the frontend can confirm against.
pub async fn create_payment_intent<S: HasServices>(
    State(state): State<S>,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>> {
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(AppError::BadRequest(format!(
            "Invalid payment amount: {}",
            request.amount
        )));
    }

    let currency = request
        .currency
        .unwrap_or_else(|| state.config().stripe.default_currency.clone());
    let intent = state
        .payment_provider()
        .create_payment_intent(request.amount, &currency)
        .await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// POST /payments — run the settlement saga. The saga runs on a detached
/// task so a client disconnect cannot cancel it between the ledger
/// append and the cart cleanup.
pub async fn settle<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<SettlePaymentInput>,
) -> Result<(StatusCode, Json<SettlementOutcome>)> {
    let task = tokio::spawn({
        let state = state.clone();
        async move { state.settlement_service().settle(input).await }
    });
    let outcome = task
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Settlement task panicked: {e}")))??;

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// GET /payments/{email} — the caller's own ledger history.
pub async fn payment_history<S: HasServices>(
    State(state): State<S>,
    user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<Payment>>> {
    policy::ensure_self(&user, &email)?;
    Ok(Json(state.settlement_service().history_for(&email).await?))
}
