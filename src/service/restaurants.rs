//! Restaurant catalogue operations

use crate::core::error::{ApiError, ApiResult};
use crate::core::restaurant::{Restaurant, RestaurantAddress};
use crate::core::validate;
use crate::storage::RestaurantStore;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Cuisine is required"))]
    pub cuisine: String,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    #[serde(default)]
    pub rating: f64,

    #[validate(length(min = 1, message = "Delivery time is required"))]
    pub delivery_time: String,

    #[validate(range(min = 0.0, message = "Minimum order must be a positive number"))]
    pub min_order: f64,

    #[validate(range(min = 0.0, message = "Distance must be a positive number"))]
    pub distance: f64,

    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,

    pub address: Option<RestaurantAddress>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Partial update for `PUT /api/restaurants/:id`; omitted fields keep
/// their stored values
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    pub delivery_time: Option<String>,
    #[validate(range(min = 0.0, message = "Minimum order must be a positive number"))]
    pub min_order: Option<f64>,
    #[validate(range(min = 0.0, message = "Distance must be a positive number"))]
    pub distance: Option<f64>,
    pub image: Option<String>,
    pub address: Option<RestaurantAddress>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct RestaurantService {
    store: Arc<dyn RestaurantStore>,
}

impl RestaurantService {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: CreateRestaurantRequest) -> ApiResult<Restaurant> {
        validate::check(&req)?;

        let restaurant = Restaurant {
            id: Uuid::new_v4(),
            name: req.name,
            cuisine: req.cuisine,
            rating: req.rating,
            delivery_time: req.delivery_time,
            min_order: req.min_order,
            distance: req.distance,
            image: req.image,
            address: req.address,
            is_active: req.is_active,
            created_at: Utc::now(),
        };

        Ok(self.store.insert(restaurant).await?)
    }

    /// Active restaurants only; inactive ones stay reachable by id.
    pub async fn list_active(&self) -> ApiResult<Vec<Restaurant>> {
        Ok(self.store.list_active().await?)
    }

    pub async fn get(&self, id: &Uuid) -> ApiResult<Restaurant> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Restaurant"))
    }

    pub async fn update(&self, id: &Uuid, req: UpdateRestaurantRequest) -> ApiResult<Restaurant> {
        validate::check(&req)?;

        let mut restaurant = self.get(id).await?;
        if let Some(name) = req.name {
            restaurant.name = name;
        }
        if let Some(cuisine) = req.cuisine {
            restaurant.cuisine = cuisine;
        }
        if let Some(rating) = req.rating {
            restaurant.rating = rating;
        }
        if let Some(delivery_time) = req.delivery_time {
            restaurant.delivery_time = delivery_time;
        }
        if let Some(min_order) = req.min_order {
            restaurant.min_order = min_order;
        }
        if let Some(distance) = req.distance {
            restaurant.distance = distance;
        }
        if let Some(image) = req.image {
            restaurant.image = image;
        }
        if let Some(address) = req.address {
            restaurant.address = Some(address);
        }
        if let Some(is_active) = req.is_active {
            restaurant.is_active = is_active;
        }

        self.store
            .replace(id, restaurant)
            .await?
            .ok_or_else(|| ApiError::not_found("Restaurant"))
    }

    pub async fn delete(&self, id: &Uuid) -> ApiResult<()> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found("Restaurant"))
        }
    }

    pub async fn by_cuisine(&self, cuisine: &str) -> ApiResult<Vec<Restaurant>> {
        Ok(self.store.find_by_cuisine(cuisine).await?)
    }

    pub async fn search(&self, query: &str) -> ApiResult<Vec<Restaurant>> {
        Ok(self.store.search_by_name(query).await?)
    }
}
