//! Payment settlement coordinator.
//!
//! Settlement is a two-step saga: the ledger append must succeed, then
//! the paid-for cart items are cleaned up on a best-effort basis. A
//! cleanup failure never rolls back the ledger; it is surfaced in the
//! outcome so the caller knows stale cart items may remain.

use crate::domain::{Payment, SettlePaymentInput};
use crate::error::{AppError, Result};
use crate::repository::{CartRepository, PaymentRepository};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use std::sync::Arc;

/// What happened to the cart after the ledger append.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CleanupReport {
    Completed { removed: u64 },
    Failed { detail: String },
}

/// Composite result of a settlement: the appended ledger record plus the
/// cart cleanup report.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementOutcome {
    pub payment: Payment,
    pub cleanup: CleanupReport,
}

impl SettlementOutcome {
    pub fn is_partial(&self) -> bool {
        matches!(self.cleanup, CleanupReport::Failed { .. })
    }
}

pub struct SettlementService<P: PaymentRepository, C: CartRepository> {
    payments: Arc<P>,
    carts: Arc<C>,
    default_currency: String,
}

impl<P: PaymentRepository, C: CartRepository> SettlementService<P, C> {
    pub fn new(payments: Arc<P>, carts: Arc<C>, default_currency: String) -> Self {
        Self {
            payments,
            carts,
            default_currency,
        }
    }

    pub async fn settle(&self, input: SettlePaymentInput) -> Result<SettlementOutcome> {
        if input.owner_email.is_empty() {
            return Err(AppError::BadRequest("Owner email is required".to_string()));
        }
        if !input.amount.is_finite() || input.amount <= 0.0 {
            return Err(AppError::BadRequest(format!(
                "Invalid payment amount: {}",
                input.amount
            )));
        }

        // Malformed ids fail the whole request before anything is written.
        let cart_ids = input
            .cart_item_ids
            .iter()
            .map(|id| {
                ObjectId::parse_str(id)
                    .map_err(|_| AppError::BadRequest(format!("Invalid cart item id: {id}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let currency = input
            .currency
            .as_deref()
            .unwrap_or(&self.default_currency);

        let payment = self
            .payments
            .append(
                &input.owner_email,
                input.amount,
                currency,
                &input.cart_item_ids,
            )
            .await?;
        tracing::info!(
            payment_id = %payment.id,
            owner = %payment.owner_email,
            amount = payment.amount,
            "Recorded payment"
        );

        // The ledger record is already durable at this point, so a cleanup
        // error degrades the outcome instead of failing the settlement.
        let cleanup = match self
            .carts
            .delete_owned(&input.owner_email, &cart_ids)
            .await
        {
            Ok(removed) => CleanupReport::Completed { removed },
            Err(e) => {
                tracing::warn!(
                    payment_id = %payment.id,
                    owner = %payment.owner_email,
                    error = %e,
                    "Cart cleanup failed after ledger append"
                );
                CleanupReport::Failed {
                    detail: "Cart cleanup failed; items may remain".to_string(),
                }
            }
        };

        Ok(SettlementOutcome { payment, cleanup })
    }

    pub async fn history_for(&self, owner_email: &str) -> Result<Vec<Payment>> {
        self.payments.find_by_owner(owner_email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockCartRepository, MockPaymentRepository};
    use chrono::Utc;
    use mockall::Sequence;

    const CART_ID: &str = "507f1f77bcf86cd799439012";

    fn sample_input() -> SettlePaymentInput {
        SettlePaymentInput {
            owner_email: "a@x.com".to_string(),
            amount: 25.0,
            currency: None,
            cart_item_ids: vec![CART_ID.to_string()],
        }
    }

    fn stored_payment(owner: &str, amount: f64, currency: &str, ids: &[String]) -> Payment {
        Payment {
            id: ObjectId::new(),
            owner_email: owner.to_string(),
            amount,
            currency: currency.to_string(),
            cart_item_ids: ids.to_vec(),
            created_at: Utc::now(),
        }
    }

    fn service(
        payments: MockPaymentRepository,
        carts: MockCartRepository,
    ) -> SettlementService<MockPaymentRepository, MockCartRepository> {
        SettlementService::new(Arc::new(payments), Arc::new(carts), "usd".to_string())
    }

    #[tokio::test]
    async fn test_append_runs_before_cleanup() {
        let mut seq = Sequence::new();
        let mut payments = MockPaymentRepository::new();
        let mut carts = MockCartRepository::new();

        payments
            .expect_append()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|owner, amount, currency, ids| {
                Ok(stored_payment(owner, amount, currency, ids))
            });
        carts
            .expect_delete_owned()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, ids| Ok(ids.len() as u64));

        let outcome = service(payments, carts)
            .settle(sample_input())
            .await
            .unwrap();
        assert!(!outcome.is_partial());
        assert!(matches!(
            outcome.cleanup,
            CleanupReport::Completed { removed: 1 }
        ));
    }

    #[tokio::test]
    async fn test_append_failure_skips_cleanup() {
        let mut payments = MockPaymentRepository::new();
        let mut carts = MockCartRepository::new();

        payments
            .expect_append()
            .returning(|_, _, _, _| Err(AppError::Internal(anyhow::anyhow!("write failed"))));
        carts.expect_delete_owned().never();

        let err = service(payments, carts)
            .settle(sample_input())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_cleanup_failure_degrades_outcome() {
        let mut payments = MockPaymentRepository::new();
        let mut carts = MockCartRepository::new();

        payments.expect_append().returning(|owner, amount, currency, ids| {
            Ok(stored_payment(owner, amount, currency, ids))
        });
        carts
            .expect_delete_owned()
            .returning(|_, _| Err(AppError::Internal(anyhow::anyhow!("delete failed"))));

        let outcome = service(payments, carts)
            .settle(sample_input())
            .await
            .unwrap();
        // The ledger record survives even though the cart is now stale.
        assert!(outcome.is_partial());
        assert_eq!(outcome.payment.owner_email, "a@x.com");
    }

    #[tokio::test]
    async fn test_cleanup_scoped_to_owner() {
        let mut payments = MockPaymentRepository::new();
        let mut carts = MockCartRepository::new();

        payments.expect_append().returning(|owner, amount, currency, ids| {
            Ok(stored_payment(owner, amount, currency, ids))
        });
        carts
            .expect_delete_owned()
            .withf(|owner, _| owner == "a@x.com")
            .returning(|_, _| Ok(1));

        let outcome = service(payments, carts)
            .settle(sample_input())
            .await
            .unwrap();
        assert!(!outcome.is_partial());
    }

    #[tokio::test]
    async fn test_cleanup_of_already_cleared_cart_succeeds() {
        let mut payments = MockPaymentRepository::new();
        let mut carts = MockCartRepository::new();

        payments.expect_append().returning(|owner, amount, currency, ids| {
            Ok(stored_payment(owner, amount, currency, ids))
        });
        carts.expect_delete_owned().returning(|_, _| Ok(0));

        let outcome = service(payments, carts)
            .settle(sample_input())
            .await
            .unwrap();
        assert!(matches!(
            outcome.cleanup,
            CleanupReport::Completed { removed: 0 }
        ));
    }

    #[tokio::test]
    async fn test_rejects_non_positive_amount() {
        let mut payments = MockPaymentRepository::new();
        let carts = MockCartRepository::new();
        payments.expect_append().never();

        let mut input = sample_input();
        input.amount = 0.0;
        let err = service(payments, carts).settle(input).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_rejects_non_finite_amount() {
        let mut payments = MockPaymentRepository::new();
        let carts = MockCartRepository::new();
        payments.expect_append().never();

        let mut input = sample_input();
        input.amount = f64::NAN;
        let err = service(payments, carts).settle(input).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_rejects_malformed_cart_id_before_append() {
        let mut payments = MockPaymentRepository::new();
        let carts = MockCartRepository::new();
        payments.expect_append().never();

        let mut input = sample_input();
        input.cart_item_ids = vec!["nope".to_string()];
        let err = service(payments, carts).settle(input).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_currency_defaults_when_absent() {
        let mut payments = MockPaymentRepository::new();
        let mut carts = MockCartRepository::new();

        payments
            .expect_append()
            .withf(|_, _, currency, _| currency == "usd")
            .returning(|owner, amount, currency, ids| {
                Ok(stored_payment(owner, amount, currency, ids))
            });
        carts.expect_delete_owned().returning(|_, _| Ok(1));

        let outcome = service(payments, carts)
            .settle(sample_input())
            .await
            .unwrap();
        assert_eq!(outcome.payment.currency, "usd");
    }

    #[test]
    fn test_outcome_serializes_cleanup_status() {
        let outcome = SettlementOutcome {
            payment: stored_payment("a@x.com", 25.0, "usd", &[CART_ID.to_string()]),
            cleanup: CleanupReport::Failed {
                detail: "Cart cleanup failed; items may remain".to_string(),
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["cleanup"]["status"], "failed");
        assert_eq!(json["payment"]["ownerEmail"], "a@x.com");
    }
}
