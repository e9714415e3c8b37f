//! Cart domain model

use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pending cart line-item, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub owner_email: String,
    /// Hex id of the referenced menu item
    pub menu_item_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

pub(crate) fn default_quantity() -> i64 {
    1
}

/// Input for adding a line-item to a cart
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemInput {
    #[validate(email)]
    pub owner_email: String,
    #[validate(length(min = 1))]
    pub menu_item_id: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_cart_item_defaults_quantity() {
        let json = r#"{
            "_id": {"$oid": "507f1f77bcf86cd799439011"},
            "ownerEmail": "a@x.com",
            "menuItemId": "507f1f77bcf86cd799439012",
            "name": "Tuna Roll",
            "price": 8.5
        }"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_add_input_rejects_zero_quantity() {
        let input = AddCartItemInput {
            owner_email: "a@x.com".to_string(),
            menu_item_id: "507f1f77bcf86cd799439012".to_string(),
            name: "Tuna Roll".to_string(),
            price: 8.5,
            quantity: 0,
        };
        assert!(input.validate().is_err());
    }
}
