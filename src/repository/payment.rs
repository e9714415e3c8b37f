//! Payment ledger repository. The ledger is append-only: there is no
//! update or delete surface, and revenue aggregation runs in the store.

use crate::domain::Payment;
use crate::error::{AppError, Result};
use crate::repository::collections;
use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Collection, Database};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn append(
        &self,
        owner_email: &str,
        amount: f64,
        currency: &str,
        cart_item_ids: &[String],
    ) -> Result<Payment>;
    async fn find_by_owner(&self, owner_email: &str) -> Result<Vec<Payment>>;
    async fn estimated_count(&self) -> Result<u64>;
    /// Sum of all ledger amounts, computed server-side with `$sum`.
    async fn total_revenue(&self) -> Result<f64>;
}

pub struct PaymentRepositoryImpl {
    coll: Collection<Payment>,
}

impl PaymentRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection(collections::PAYMENTS),
        }
    }

    fn raw(&self) -> Collection<Document> {
        self.coll.clone_with_type()
    }
}

#[async_trait]
impl PaymentRepository for PaymentRepositoryImpl {
    async fn append(
        &self,
        owner_email: &str,
        amount: f64,
        currency: &str,
        cart_item_ids: &[String],
    ) -> Result<Payment> {
        let id = ObjectId::new();
        let created_at = Utc::now();

        self.raw()
            .insert_one(doc! {
                "_id": id,
                "ownerEmail": owner_email,
                "amount": amount,
                "currency": currency,
                "cartItemIds": cart_item_ids.to_vec(),
                "createdAt": created_at.to_rfc3339(),
            })
            .await?;

        self.coll
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to record payment")))
    }

    async fn find_by_owner(&self, owner_email: &str) -> Result<Vec<Payment>> {
        let cursor = self
            .coll
            .find(doc! { "ownerEmail": owner_email })
            .sort(doc! { "createdAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn estimated_count(&self) -> Result<u64> {
        Ok(self.coll.estimated_document_count().await?)
    }

    async fn total_revenue(&self) -> Result<f64> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": null,
                "totalRevenue": { "$sum": "$amount" },
            }
        }];
        let mut cursor = self.coll.aggregate(pipeline).await?;
        let total = match cursor.try_next().await? {
            Some(doc) => doc
                .get("totalRevenue")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0),
            // Empty ledger produces no group at all
            None => 0.0,
        };
        Ok(total)
    }
}
