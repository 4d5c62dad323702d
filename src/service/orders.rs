//! Order operations: checkout, lookup, time-driven and manual status updates
//!
//! The auto-update path is the interesting one: it applies the pure
//! [`policy::next_status`] function to the stored order and persists the
//! result with a conditional write (update-if-status-still-equals), so two
//! racing auto-update calls cannot double-advance an order. Either way an
//! invocation performs at most one write.

use crate::core::error::{ApiError, ApiResult};
use crate::core::order::{DeliveryAddress, Order, OrderItem, OrderStatus, PaymentMethod};
use crate::core::{policy, validate};
use crate::storage::OrderStore;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// How many random order numbers to try before giving up
const ORDER_NUMBER_ATTEMPTS: u32 = 5;

/// Checkout payload; id, orderNumber, createdAt and status are
/// server-assigned
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "Items must be a non-empty array"))]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,

    #[validate(range(min = 0.0, message = "Total amount must be a positive number"))]
    pub total: f64,

    pub payment_method: PaymentMethod,
    pub delivery_address: DeliveryAddress,
}

/// One checkout line
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub menu_item_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Item price must be a positive number"))]
    pub price: f64,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,

    #[validate(length(min = 1, message = "Restaurant name is required"))]
    pub restaurant_name: String,

    pub image: Option<String>,
}

impl From<OrderItemRequest> for OrderItem {
    fn from(req: OrderItemRequest) -> Self {
        OrderItem {
            menu_item_id: req.menu_item_id,
            name: req.name,
            price: req.price,
            quantity: req.quantity,
            restaurant_name: req.restaurant_name,
            image: req.image,
        }
    }
}

/// Manual status update body for `PATCH /api/orders/:id`
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// One page of a user's order history
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

/// Order operations over an [`OrderStore`]
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Create an order from a checkout payload.
    ///
    /// The total is stored exactly as supplied — the client prices the cart
    /// (items + delivery fee + tax) and the server does not recompute it.
    /// Initial status is always `processing`.
    pub async fn create(&self, req: CreateOrderRequest) -> ApiResult<Order> {
        validate::check(&req)?;

        let order = Order {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            items: req.items.into_iter().map(Into::into).collect(),
            total: req.total,
            status: OrderStatus::Processing,
            order_number: self.unique_order_number().await?,
            created_at: Utc::now(),
            payment_method: req.payment_method,
            delivery_address: req.delivery_address,
        };

        let created = self.store.insert(order).await?;
        tracing::info!(order_number = %created.order_number, user = %created.user_id, "order created");
        Ok(created)
    }

    pub async fn get(&self, id: &Uuid) -> ApiResult<Order> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Order"))
    }

    pub async fn list(&self) -> ApiResult<Vec<Order>> {
        Ok(self.store.list().await?)
    }

    /// A user's order history, newest first, paginated.
    pub async fn list_by_user(&self, user_id: &str, page: u64, limit: u64) -> ApiResult<OrderPage> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        // Query params are attacker-controlled; saturate instead of
        // overflowing on absurd page numbers.
        let skip = page.saturating_sub(1).saturating_mul(limit);

        let (orders, total) = self.store.page_by_user(user_id, skip, limit).await?;
        Ok(OrderPage {
            orders,
            pagination: Pagination {
                page,
                limit,
                total,
                pages: total.div_ceil(limit),
            },
        })
    }

    /// Advance the order's status according to elapsed time, at most one
    /// step, persisting only if something changed.
    pub async fn auto_update_status(&self, id: &Uuid) -> ApiResult<Order> {
        let order = self.get(id).await?;

        if !order.status.is_in_progress() {
            return Ok(order);
        }

        let elapsed = order.elapsed_minutes(Utc::now());
        let next = policy::next_status(order.status, elapsed);
        if next == order.status {
            return Ok(order);
        }

        match self.store.set_status_if(id, order.status, next).await? {
            Some(updated) => {
                tracing::info!(
                    order_number = %updated.order_number,
                    from = %order.status,
                    to = %updated.status,
                    "order status auto-advanced"
                );
                Ok(updated)
            }
            // Lost a race (or the order vanished): re-read rather than
            // clobber the concurrent write.
            None => self.get(id).await,
        }
    }

    /// Set the status to any of the enumerated values. No monotonicity is
    /// enforced: reverting is allowed.
    pub async fn set_status(&self, id: &Uuid, status: &str) -> ApiResult<Order> {
        let status = OrderStatus::from_str(status)
            .map_err(|_| ApiError::invalid(format!("status: Invalid status '{status}'")))?;

        self.store
            .set_status(id, status)
            .await?
            .ok_or_else(|| ApiError::not_found("Order"))
    }

    pub async fn delete(&self, id: &Uuid) -> ApiResult<()> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found("Order"))
        }
    }

    /// Account-deletion cascade; returns the number of orders removed.
    pub async fn delete_by_user(&self, user_id: &str) -> ApiResult<u64> {
        Ok(self.store.delete_by_user(user_id).await?)
    }

    /// Health probe passthrough to the backing store
    pub async fn ping(&self) -> ApiResult<()> {
        Ok(self.store.ping().await?)
    }

    /// Generate an order number that no existing order uses.
    ///
    /// The keyspace is small (ORD- plus five digits) so collisions are
    /// retried a few times; the store's unique index is the final arbiter.
    async fn unique_order_number(&self) -> ApiResult<String> {
        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let candidate = format!("ORD-{}", rand::thread_rng().gen_range(10_000..100_000));
            if self
                .store
                .find_by_order_number(&candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }
        }
        Err(ApiError::Conflict {
            field: "orderNumber",
        })
    }
}
