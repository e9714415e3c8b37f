//! Customer review domain model

use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};

/// Customer review; served read-only by this backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: String,
    pub details: String,
    pub rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_round_trip_via_json() {
        let json = r#"{
            "_id": {"$oid": "507f1f77bcf86cd799439011"},
            "name": "Ava",
            "details": "Great food",
            "rating": 4.5
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.rating, 4.5);

        let out = serde_json::to_value(&review).unwrap();
        assert_eq!(out["_id"], "507f1f77bcf86cd799439011");
    }
}
