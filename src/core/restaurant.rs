//! Restaurant catalogue entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A restaurant's street address, all parts optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

/// A restaurant in the catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    /// 0 to 5 stars
    pub rating: f64,
    /// Display string, e.g. "25-35 min"
    pub delivery_time: String,
    pub min_order: f64,
    /// Distance from the customer in kilometres
    pub distance: f64,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<RestaurantAddress>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let restaurant = Restaurant {
            id: Uuid::new_v4(),
            name: "Mario's".to_string(),
            cuisine: "Italian".to_string(),
            rating: 4.5,
            delivery_time: "25-35 min".to_string(),
            min_order: 150.0,
            distance: 2.4,
            image: "marios.jpg".to_string(),
            address: None,
            is_active: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&restaurant).unwrap();
        assert_eq!(json["deliveryTime"], "25-35 min");
        assert_eq!(json["minOrder"], 150.0);
        assert_eq!(json["isActive"], true);
        assert!(json.get("address").is_none());
    }
}
