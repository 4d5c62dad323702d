//! # FoodExpress API
//!
//! A food-ordering REST backend: restaurants, menu items, users, and orders
//! with a time-driven status lifecycle.
//!
//! ## Architecture
//!
//! - **Domain model** ([`core`]): orders, restaurants, menu items and user
//!   profiles, plus the pure [`core::policy`] function that advances an
//!   order's status based on wall-clock time since creation.
//! - **Storage** ([`storage`]): document-store traits with an in-memory
//!   backend (default) and a MongoDB backend behind the `mongodb_backend`
//!   feature.
//! - **Services** ([`service`]): the operations the HTTP layer exposes,
//!   storage-agnostic and independently testable.
//! - **Server** ([`server`]): axum handlers, router assembly and a
//!   [`server::ServerBuilder`] with graceful shutdown.
//! - **Client** ([`client`], feature `client`): a polling tracker that keeps
//!   a displayed order's status current without manual refresh.
//!
//! ## Order lifecycle
//!
//! Orders start at `processing` and advance automatically through
//! `preparing`, `outForDelivery` and `delivered` as time elapses since
//! `createdAt` (1, 5 and 15 minutes respectively). The advance happens at
//! most one step per call to the auto-update endpoint; clients poll it.
//! `pending`, `completed` and `cancelled` are only ever set explicitly.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use foodexpress::prelude::*;
//!
//! let config = AppConfig::from_env();
//! ServerBuilder::new(config)
//!     .with_in_memory_stores()
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod service;
pub mod storage;

#[cfg(feature = "client")]
pub mod client;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::config::{AppConfig, Environment};
    pub use crate::core::error::{ApiError, ApiResult, ErrorBody};
    pub use crate::core::menu::MenuItem;
    pub use crate::core::order::{
        DeliveryAddress, Order, OrderItem, OrderStatus, PaymentMethod, StructuredAddress,
    };
    pub use crate::core::policy;
    pub use crate::core::restaurant::Restaurant;
    pub use crate::core::user::{Address, User};
    pub use crate::server::ServerBuilder;
    pub use crate::service::menu::MenuService;
    pub use crate::service::orders::{CreateOrderRequest, OrderPage, OrderService};
    pub use crate::service::restaurants::RestaurantService;
    pub use crate::service::users::UserService;
    pub use crate::storage::in_memory::{
        InMemoryOrderStore, InMemoryStore, InMemoryUserStore,
    };
    pub use crate::storage::{DataStore, Document, MenuStore, OrderStore, RestaurantStore, UserStore};

    #[cfg(feature = "client")]
    pub use crate::client::{OrderPoller, PollerConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
