//! Menu endpoints

use crate::core::error::ApiResult;
use crate::core::menu::MenuItem;
use crate::server::AppState;
use crate::service::menu::{CreateMenuItemRequest, UpdateMenuItemRequest};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

/// `GET /api/menu`, available items only
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.menu.list_available().await?))
}

/// `GET /api/menu/restaurant/{restaurant_id}`
pub async fn list_by_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.menu.by_restaurant(&restaurant_id).await?))
}

/// `GET /api/menu/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(state.menu.get(&id).await?))
}

/// `POST /api/menu`
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateMenuItemRequest>,
) -> ApiResult<(StatusCode, Json<MenuItem>)> {
    let item = state.menu.create(req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /api/menu/{id}`, merging supplied fields
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMenuItemRequest>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(state.menu.update(&id, req).await?))
}

/// `DELETE /api/menu/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    state.menu.delete(&id).await?;
    Ok(Json(json!({ "message": "Menu item deleted successfully" })))
}
