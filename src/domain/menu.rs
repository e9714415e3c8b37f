//! Menu catalog domain model

use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Input for creating a menu item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMenuItemInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub recipe: Option<String>,
    pub image: Option<String>,
}

/// Partial update for a menu item; only the provided fields are written
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMenuItemInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub recipe: Option<String>,
    pub image: Option<String>,
}

impl UpdateMenuItemInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.recipe.is_none()
            && self.image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_menu_item_serialization() {
        let item = MenuItem {
            id: ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap(),
            name: "Tuna Roll".to_string(),
            category: "sushi".to_string(),
            price: 8.5,
            recipe: None,
            image: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["_id"], "507f1f77bcf86cd799439011");
        assert_eq!(json["price"], 8.5);
        assert!(json.get("recipe").is_none());
    }

    #[test]
    fn test_create_input_rejects_negative_price() {
        let input = CreateMenuItemInput {
            name: "Soup".to_string(),
            category: "starter".to_string(),
            price: -1.0,
            recipe: None,
            image: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_input_is_empty() {
        assert!(UpdateMenuItemInput::default().is_empty());
        let input = UpdateMenuItemInput {
            price: Some(9.0),
            ..Default::default()
        };
        assert!(!input.is_empty());
    }
}
