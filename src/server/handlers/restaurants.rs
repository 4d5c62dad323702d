//! Restaurant catalogue endpoints

use crate::core::error::ApiResult;
use crate::core::restaurant::Restaurant;
use crate::server::AppState;
use crate::service::restaurants::{CreateRestaurantRequest, UpdateRestaurantRequest};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

/// `GET /api/restaurants`, active restaurants only
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Restaurant>>> {
    Ok(Json(state.restaurants.list_active().await?))
}

/// `GET /api/restaurants/cuisine/{cuisine}`, exact match
pub async fn by_cuisine(
    State(state): State<AppState>,
    Path(cuisine): Path<String>,
) -> ApiResult<Json<Vec<Restaurant>>> {
    Ok(Json(state.restaurants.by_cuisine(&cuisine).await?))
}

/// `GET /api/restaurants/search/{query}`, case-insensitive name substring
pub async fn search(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> ApiResult<Json<Vec<Restaurant>>> {
    Ok(Json(state.restaurants.search(&query).await?))
}

/// `POST /api/restaurants`
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRestaurantRequest>,
) -> ApiResult<(StatusCode, Json<Restaurant>)> {
    let restaurant = state.restaurants.create(req).await?;
    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// `GET /api/restaurants/{id}`; finds inactive restaurants too
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Restaurant>> {
    Ok(Json(state.restaurants.get(&id).await?))
}

/// `PUT /api/restaurants/{id}`, merging supplied fields
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRestaurantRequest>,
) -> ApiResult<Json<Restaurant>> {
    Ok(Json(state.restaurants.update(&id, req).await?))
}

/// `DELETE /api/restaurants/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    state.restaurants.delete(&id).await?;
    Ok(Json(json!({ "message": "Restaurant deleted successfully" })))
}
