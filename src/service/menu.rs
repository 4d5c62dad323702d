//! Menu item operations

use crate::core::error::{ApiError, ApiResult};
use crate::core::menu::MenuItem;
use crate::core::validate;
use crate::storage::MenuStore;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    pub restaurant_id: Uuid,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: f64,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,

    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_spicy: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

/// Partial update for `PUT /api/menu/:id`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub is_vegetarian: Option<bool>,
    pub is_spicy: Option<bool>,
    pub is_available: Option<bool>,
}

#[derive(Clone)]
pub struct MenuService {
    store: Arc<dyn MenuStore>,
}

impl MenuService {
    pub fn new(store: Arc<dyn MenuStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: CreateMenuItemRequest) -> ApiResult<MenuItem> {
        validate::check(&req)?;

        let item = MenuItem {
            id: Uuid::new_v4(),
            restaurant_id: req.restaurant_id,
            name: req.name,
            description: req.description,
            price: req.price,
            category: req.category,
            image: req.image,
            is_vegetarian: req.is_vegetarian,
            is_spicy: req.is_spicy,
            is_available: req.is_available,
            created_at: Utc::now(),
        };

        Ok(self.store.insert(item).await?)
    }

    pub async fn list_available(&self) -> ApiResult<Vec<MenuItem>> {
        Ok(self.store.list_available().await?)
    }

    /// Available items for one restaurant's menu page.
    pub async fn by_restaurant(&self, restaurant_id: &Uuid) -> ApiResult<Vec<MenuItem>> {
        Ok(self.store.find_by_restaurant(restaurant_id).await?)
    }

    pub async fn get(&self, id: &Uuid) -> ApiResult<MenuItem> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Menu item"))
    }

    pub async fn update(&self, id: &Uuid, req: UpdateMenuItemRequest) -> ApiResult<MenuItem> {
        validate::check(&req)?;

        let mut item = self.get(id).await?;
        if let Some(name) = req.name {
            item.name = name;
        }
        if let Some(description) = req.description {
            item.description = description;
        }
        if let Some(price) = req.price {
            item.price = price;
        }
        if let Some(category) = req.category {
            item.category = category;
        }
        if let Some(image) = req.image {
            item.image = image;
        }
        if let Some(is_vegetarian) = req.is_vegetarian {
            item.is_vegetarian = is_vegetarian;
        }
        if let Some(is_spicy) = req.is_spicy {
            item.is_spicy = is_spicy;
        }
        if let Some(is_available) = req.is_available {
            item.is_available = is_available;
        }

        self.store
            .replace(id, item)
            .await?
            .ok_or_else(|| ApiError::not_found("Menu item"))
    }

    pub async fn delete(&self, id: &Uuid) -> ApiResult<()> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found("Menu item"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::in_memory::InMemoryStore;
    use serde_json::json;

    fn service() -> MenuService {
        MenuService::new(Arc::new(InMemoryStore::new()))
    }

    fn create_request(restaurant_id: Uuid, name: &str) -> CreateMenuItemRequest {
        serde_json::from_value(json!({
            "restaurantId": restaurant_id,
            "name": name,
            "description": "A classic",
            "price": 300.0,
            "category": "Pizza",
            "image": "img.jpg"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_defaults_flags() {
        let service = service();
        let item = service
            .create(create_request(Uuid::new_v4(), "Margherita"))
            .await
            .unwrap();
        assert!(item.is_available);
        assert!(!item.is_vegetarian);
        assert!(!item.is_spicy);
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let service = service();
        let mut req = create_request(Uuid::new_v4(), "Margherita");
        req.price = -1.0;
        assert!(matches!(
            service.create(req).await.unwrap_err(),
            ApiError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn by_restaurant_filters_unavailable_items() {
        let service = service();
        let restaurant_id = Uuid::new_v4();
        service
            .create(create_request(restaurant_id, "Margherita"))
            .await
            .unwrap();
        let off_menu = service
            .create(create_request(restaurant_id, "Calzone"))
            .await
            .unwrap();
        service
            .create(create_request(Uuid::new_v4(), "Noodles"))
            .await
            .unwrap();

        let update = UpdateMenuItemRequest {
            is_available: Some(false),
            ..Default::default()
        };
        service.update(&off_menu.id, update).await.unwrap();

        let menu = service.by_restaurant(&restaurant_id).await.unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].name, "Margherita");
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let service = service();
        let update = UpdateMenuItemRequest {
            price: Some(250.0),
            ..Default::default()
        };
        assert!(matches!(
            service.update(&Uuid::new_v4(), update).await.unwrap_err(),
            ApiError::NotFound { .. }
        ));
    }
}
