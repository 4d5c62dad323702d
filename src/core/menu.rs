//! Menu item entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dish on a restaurant's menu
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub is_vegetarian: bool,
    pub is_spicy: bool,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let item = MenuItem {
            id: Uuid::new_v4(),
            restaurant_id: Uuid::new_v4(),
            name: "Margherita".to_string(),
            description: "Tomato, mozzarella, basil".to_string(),
            price: 300.0,
            category: "Pizza".to_string(),
            image: "margherita.jpg".to_string(),
            is_vegetarian: true,
            is_spicy: false,
            is_available: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["isVegetarian"], true);
        assert_eq!(json["isSpicy"], false);
        assert!(json.get("restaurantId").is_some());
    }
}
