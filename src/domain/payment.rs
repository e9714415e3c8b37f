//! Payment ledger domain model

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};

/// Settled payment. Append-only: once written, a record is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub owner_email: String,
    pub amount: f64,
    pub currency: String,
    /// Hex ids of the cart items this payment supersedes
    pub cart_item_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Payment submission handed to the settlement coordinator
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlePaymentInput {
    pub owner_email: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub cart_item_ids: Vec<String>,
}

/// Dashboard reporting snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub users: u64,
    pub menu_items: u64,
    pub orders: u64,
    pub total_revenue: f64,
}
