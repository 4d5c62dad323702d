//! User profile endpoints

use crate::core::error::ApiResult;
use crate::core::user::User;
use crate::server::AppState;
use crate::service::users::{CreateUserRequest, SaveAddressRequest, UpdateUserRequest};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

/// `POST /api/users`; 409 when the profile already exists
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.users.create(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /api/users/{uid}`
pub async fn get_by_uid(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.get(&uid).await?))
}

/// `PATCH /api/users/{uid}` with `{name?, email?}`
pub async fn update(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.update(&uid, req).await?))
}

/// `DELETE /api/users/{uid}`, cascading to the user's orders
pub async fn delete(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> ApiResult<Json<Value>> {
    let orders_removed = state.users.delete(&uid).await?;
    Ok(Json(json!({
        "message": "User and all associated data deleted successfully",
        "ordersRemoved": orders_removed,
    })))
}

/// `PATCH /api/users/{uid}/address`; adds or edits one address-book entry
pub async fn save_address(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(req): Json<SaveAddressRequest>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.save_address(&uid, req).await?))
}

/// `DELETE /api/users/{uid}/address/{address_id}`
pub async fn remove_address(
    State(state): State<AppState>,
    Path((uid, address_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.remove_address(&uid, &address_id).await?))
}
