//! Time-based order status progression
//!
//! A pure function of (current status, minutes elapsed since the order was
//! created). Thresholds are measured from `createdAt`, not from the previous
//! transition, and a single invocation advances at most one step — callers
//! (the poller, via the auto-update endpoint) re-invoke it over time.

use crate::core::order::OrderStatus;

/// Minutes after creation at which `processing` becomes `preparing`
pub const PREPARING_AFTER_MIN: f64 = 1.0;

/// Minutes after creation at which `preparing` becomes `outForDelivery`
pub const OUT_FOR_DELIVERY_AFTER_MIN: f64 = 5.0;

/// Minutes after creation at which `outForDelivery` becomes `delivered`
pub const DELIVERED_AFTER_MIN: f64 = 15.0;

/// Decide the next status for an order given the minutes elapsed since its
/// creation.
///
/// Statuses outside the in-progress set (`processing`, `preparing`,
/// `outForDelivery`) are returned unchanged regardless of elapsed time.
/// At most one step is applied per call, even when several thresholds have
/// already been crossed.
pub fn next_status(current: OrderStatus, elapsed_minutes: f64) -> OrderStatus {
    match current {
        OrderStatus::Processing if elapsed_minutes >= PREPARING_AFTER_MIN => {
            OrderStatus::Preparing
        }
        OrderStatus::Preparing if elapsed_minutes >= OUT_FOR_DELIVERY_AFTER_MIN => {
            OrderStatus::OutForDelivery
        }
        OrderStatus::OutForDelivery if elapsed_minutes >= DELIVERED_AFTER_MIN => {
            OrderStatus::Delivered
        }
        other => other,
    }
}
