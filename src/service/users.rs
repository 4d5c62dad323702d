//! User profile operations
//!
//! Profiles are keyed by the opaque uid the identity provider hands the
//! frontend. Deleting a profile cascades to the user's orders.

use crate::core::error::{ApiError, ApiResult};
use crate::core::user::{Address, User};
use crate::core::validate;
use crate::storage::{OrderStore, UserStore};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub uid: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Email must be valid"))]
    pub email: String,
}

/// Partial update for `PATCH /api/users/:uid`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,

    #[validate(email(message = "Email must be valid"))]
    pub email: Option<String>,
}

/// Body of `PATCH /api/users/:uid/address`.
///
/// With `address_id` set this edits the existing entry in place; without it
/// a new entry is appended.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveAddressRequest {
    pub address_id: Option<Uuid>,

    #[validate(nested)]
    pub address: AddressPayload,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    pub label: Option<String>,

    #[validate(length(min = 1, message = "Street is required"))]
    pub street: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,

    #[validate(length(min = 1, message = "Postal code is required"))]
    pub postal_code: String,

    #[serde(default)]
    pub is_default: bool,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    orders: Arc<dyn OrderStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { users, orders }
    }

    pub async fn create(&self, req: CreateUserRequest) -> ApiResult<User> {
        validate::check(&req)?;

        if self.users.get(&req.uid).await?.is_some() {
            return Err(ApiError::Conflict { field: "uid" });
        }

        let user = User::new(req.uid, req.name, req.email);
        Ok(self.users.insert(user).await?)
    }

    /// Fetch a profile. Older profiles may have addresses without an elected
    /// default; backfill one and persist it before answering.
    pub async fn get(&self, uid: &str) -> ApiResult<User> {
        let mut user = self
            .users
            .get(uid)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))?;

        if user.ensure_default() {
            user.updated_at = chrono::Utc::now();
            if let Some(saved) = self.users.replace(uid, user.clone()).await? {
                user = saved;
            }
        }
        Ok(user)
    }

    pub async fn update(&self, uid: &str, req: UpdateUserRequest) -> ApiResult<User> {
        validate::check(&req)?;

        let mut user = self.get(uid).await?;
        if let Some(name) = req.name {
            user.name = name;
        }
        if let Some(email) = req.email {
            user.email = email;
        }
        user.updated_at = chrono::Utc::now();

        self.users
            .replace(uid, user)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))
    }

    /// Delete the profile and every order the user placed. Returns the
    /// number of orders removed.
    pub async fn delete(&self, uid: &str) -> ApiResult<u64> {
        if !self.users.delete(uid).await? {
            return Err(ApiError::not_found("User"));
        }
        let removed = self.orders.delete_by_user(uid).await?;
        tracing::info!(uid, orders_removed = removed, "user account deleted");
        Ok(removed)
    }

    pub async fn save_address(&self, uid: &str, req: SaveAddressRequest) -> ApiResult<User> {
        validate::check(&req)?;

        let mut user = self.get(uid).await?;

        let id = req.address_id.unwrap_or_else(Uuid::new_v4);
        if req.address_id.is_some() && !user.addresses.iter().any(|a| a.id == id) {
            return Err(ApiError::not_found("Address"));
        }

        let address = req.address;
        user.upsert_address(Address {
            id,
            label: address.label,
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            is_default: address.is_default,
        });
        user.updated_at = chrono::Utc::now();

        self.users
            .replace(uid, user)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))
    }

    pub async fn remove_address(&self, uid: &str, address_id: &Uuid) -> ApiResult<User> {
        let mut user = self.get(uid).await?;

        if !user.remove_address(address_id) {
            return Err(ApiError::not_found("Address"));
        }
        user.updated_at = chrono::Utc::now();

        self.users
            .replace(uid, user)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::orders::{CreateOrderRequest, OrderService};
    use crate::storage::in_memory::{InMemoryOrderStore, InMemoryUserStore};
    use serde_json::json;

    fn service() -> (UserService, Arc<InMemoryOrderStore>) {
        let orders = Arc::new(InMemoryOrderStore::new());
        let users = UserService::new(Arc::new(InMemoryUserStore::new()), orders.clone());
        (users, orders)
    }

    fn create_request(uid: &str) -> CreateUserRequest {
        serde_json::from_value(json!({
            "uid": uid,
            "name": "Asha",
            "email": "asha@example.com"
        }))
        .unwrap()
    }

    fn address_request(street: &str, is_default: bool) -> SaveAddressRequest {
        serde_json::from_value(json!({
            "address": {
                "street": street,
                "city": "Mumbai",
                "state": "MH",
                "postalCode": "400001",
                "isDefault": is_default
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_twice_conflicts() {
        let (service, _) = service();
        service.create(create_request("uid-1")).await.unwrap();
        assert!(matches!(
            service.create(create_request("uid-1")).await.unwrap_err(),
            ApiError::Conflict { .. }
        ));
    }

    #[tokio::test]
    async fn bad_email_is_rejected() {
        let (service, _) = service();
        let req: CreateUserRequest = serde_json::from_value(
            json!({"uid": "uid-1", "name": "Asha", "email": "not-an-email"}),
        )
        .unwrap();
        assert!(matches!(
            service.create(req).await.unwrap_err(),
            ApiError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn save_address_marks_single_default() {
        let (service, _) = service();
        service.create(create_request("uid-1")).await.unwrap();

        service
            .save_address("uid-1", address_request("1 First St", true))
            .await
            .unwrap();
        let user = service
            .save_address("uid-1", address_request("2 Second St", true))
            .await
            .unwrap();

        assert_eq!(user.addresses.len(), 2);
        assert_eq!(user.addresses.iter().filter(|a| a.is_default).count(), 1);
        assert!(user.default_address.starts_with("2 Second St"));
    }

    #[tokio::test]
    async fn edit_with_unknown_address_id_is_not_found() {
        let (service, _) = service();
        service.create(create_request("uid-1")).await.unwrap();

        let mut req = address_request("1 First St", false);
        req.address_id = Some(Uuid::new_v4());
        assert!(matches!(
            service.save_address("uid-1", req).await.unwrap_err(),
            ApiError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn remove_default_elects_next() {
        let (service, _) = service();
        service.create(create_request("uid-1")).await.unwrap();

        let user = service
            .save_address("uid-1", address_request("1 First St", true))
            .await
            .unwrap();
        let first_id = user.addresses[0].id;
        service
            .save_address("uid-1", address_request("2 Second St", false))
            .await
            .unwrap();

        let user = service.remove_address("uid-1", &first_id).await.unwrap();
        assert_eq!(user.addresses.len(), 1);
        assert!(user.addresses[0].is_default);
    }

    #[tokio::test]
    async fn get_backfills_missing_default() {
        let (service, _) = service();
        service.create(create_request("uid-1")).await.unwrap();
        service
            .save_address("uid-1", address_request("1 First St", false))
            .await
            .unwrap();

        let user = service.get("uid-1").await.unwrap();
        assert!(user.addresses[0].is_default);
        assert!(!user.default_address.is_empty());

        // Persisted, not just rendered
        let again = service.get("uid-1").await.unwrap();
        assert!(again.addresses[0].is_default);
    }

    fn checkout_request(user_id: &str) -> CreateOrderRequest {
        serde_json::from_value(json!({
            "userId": user_id,
            "items": [{
                "name": "Pizza",
                "price": 300.0,
                "quantity": 1,
                "restaurantName": "Mario's"
            }],
            "total": 300.0,
            "paymentMethod": {"type": "cash"},
            "deliveryAddress": "12 Baker Street, London"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn delete_cascades_to_orders() {
        let (service, order_store) = service();
        service.create(create_request("uid-1")).await.unwrap();

        let orders = OrderService::new(order_store);
        orders.create(checkout_request("uid-1")).await.unwrap();
        orders.create(checkout_request("uid-1")).await.unwrap();
        orders.create(checkout_request("uid-2")).await.unwrap();

        let removed = service.delete("uid-1").await.unwrap();
        assert_eq!(removed, 2);

        let page = orders.list_by_user("uid-2", 1, 10).await.unwrap();
        assert_eq!(page.pagination.total, 1);
        assert!(matches!(
            service.get("uid-1").await.unwrap_err(),
            ApiError::NotFound { .. }
        ));
    }
}
