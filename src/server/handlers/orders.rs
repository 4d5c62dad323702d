//! Order endpoints
//!
//! Fetches are plain reads; the in-progress lifecycle advances only through
//! the explicit auto-update endpoint, which tracking clients poll.

use crate::core::error::ApiResult;
use crate::core::order::Order;
use crate::server::AppState;
use crate::service::orders::{CreateOrderRequest, OrderPage, UpdateStatusRequest};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// `POST /api/orders`
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state.orders.create(req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list().await?))
}

/// `GET /api/orders/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.get(&id).await?))
}

/// `POST /api/orders/{id}/auto-update-status`, advancing at most one step
pub async fn auto_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.auto_update_status(&id).await?))
}

/// `GET /api/orders/user/{user_id}?page=&limit=`
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<OrderPage>> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(20);
    Ok(Json(state.orders.list_by_user(&user_id, page, limit).await?))
}

/// `PATCH /api/orders/{id}` with `{"status": "..."}`
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.set_status(&id, &req.status).await?))
}

/// `DELETE /api/orders/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    state.orders.delete(&id).await?;
    Ok(Json(json!({ "message": "Order deleted successfully" })))
}
