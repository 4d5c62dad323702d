//! The order aggregate: items, payment, delivery address and status
//!
//! Wire field names are camelCase and the seven status tokens are part of
//! the HTTP contract; the serde attributes here must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The lifecycle state of an order.
///
/// `processing`, `preparing` and `outForDelivery` are the in-progress
/// states that the automatic policy advances; the rest are terminal or
/// externally set and only change through explicit status updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Preparing,
    OutForDelivery,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All seven wire tokens, in lifecycle order
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// The exact wire token for this status
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "outForDelivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the automatic status policy applies to this status
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            OrderStatus::Processing | OrderStatus::Preparing | OrderStatus::OutForDelivery
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid status: {s}"))
    }
}

/// A single line of an order, snapshotted at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_item_id: Option<Uuid>,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub restaurant_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Payment method chosen at checkout, with variant-specific details.
///
/// Serializes as `{"type": "credit"|"digital"|"cash", "details": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details", rename_all = "lowercase")]
pub enum PaymentMethod {
    #[serde(rename_all = "camelCase")]
    Credit {
        card_number: String,
        card_name: String,
        card_expiry: String,
    },
    #[serde(rename_all = "camelCase")]
    Digital { digital_payment_code: String },
    Cash,
}

/// Structured delivery address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Delivery address snapshot taken at order time.
///
/// Some checkout flows send a plain comma-joined string, others a
/// structured object; both shapes are accepted and preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeliveryAddress {
    FreeText(String),
    Structured(StructuredAddress),
}

/// A persisted order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    /// Opaque identifier of the owning user
    pub user_id: String,
    pub items: Vec<OrderItem>,
    /// Monetary total as supplied at checkout; never recomputed from items
    pub total: f64,
    pub status: OrderStatus,
    /// Unique human-facing reference, immutable after creation
    pub order_number: String,
    pub created_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub delivery_address: DeliveryAddress,
}

impl Order {
    /// Whole minutes are too coarse for the 1-minute threshold, so elapsed
    /// time is measured in fractional minutes.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> f64 {
        (now - self.created_at).num_milliseconds() as f64 / 60_000.0
    }
}
