//! Document storage abstraction
//!
//! The service layer talks to these traits; backends are swappable. The
//! in-memory backend (default feature) covers tests and development, the
//! MongoDB backend (`mongodb_backend` feature) covers deployment.
//!
//! Storage methods return `anyhow::Result`; mapping a missing document to a
//! 404 is the service layer's job, so lookups return `Option` and deletes
//! report whether anything was removed.

use crate::core::menu::MenuItem;
use crate::core::order::{Order, OrderStatus};
use crate::core::restaurant::Restaurant;
use crate::core::user::User;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub mod in_memory;

#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

/// A persistable document with a UUID primary key
pub trait Document: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Collection name in the backing store (plural, e.g. "orders")
    fn collection_name() -> &'static str;

    fn id(&self) -> Uuid;

    /// Used for newest-first ordering of listings
    fn created_at(&self) -> DateTime<Utc>;
}

impl Document for Order {
    fn collection_name() -> &'static str {
        "orders"
    }
    fn id(&self) -> Uuid {
        self.id
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Document for Restaurant {
    fn collection_name() -> &'static str {
        "restaurants"
    }
    fn id(&self) -> Uuid {
        self.id
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Document for MenuItem {
    fn collection_name() -> &'static str {
        "menu_items"
    }
    fn id(&self) -> Uuid {
        self.id
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Generic CRUD over a document collection
#[async_trait]
pub trait DataStore<T: Document>: Send + Sync {
    /// Insert a new document
    async fn insert(&self, doc: T) -> Result<T>;

    /// Fetch by id; `None` when absent
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// All documents, newest first
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing document; `None` when absent
    async fn replace(&self, id: &Uuid, doc: T) -> Result<Option<T>>;

    /// Delete by id; `false` when absent
    async fn delete(&self, id: &Uuid) -> Result<bool>;

    /// Backend liveness check for the health endpoint
    async fn ping(&self) -> Result<()>;
}

/// Order-specific operations on top of [`DataStore`]
#[async_trait]
pub trait OrderStore: DataStore<Order> {
    /// Look up an order by its human-facing number
    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>>;

    /// One page of a user's orders (newest first) plus the user's total count
    async fn page_by_user(&self, user_id: &str, skip: u64, limit: u64)
        -> Result<(Vec<Order>, u64)>;

    /// Overwrite the status field unconditionally; `None` when absent
    async fn set_status(&self, id: &Uuid, status: OrderStatus) -> Result<Option<Order>>;

    /// Conditional status write: only applies when the stored status still
    /// equals `expected`. Returns the updated order, or `None` when the
    /// order is missing or was concurrently moved off `expected`.
    async fn set_status_if(
        &self,
        id: &Uuid,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<Order>>;

    /// Delete all of a user's orders (account-deletion cascade); returns the
    /// number removed
    async fn delete_by_user(&self, user_id: &str) -> Result<u64>;
}

/// Restaurant catalogue queries on top of [`DataStore`]
#[async_trait]
pub trait RestaurantStore: DataStore<Restaurant> {
    /// Active restaurants, newest first
    async fn list_active(&self) -> Result<Vec<Restaurant>>;

    /// Exact cuisine match
    async fn find_by_cuisine(&self, cuisine: &str) -> Result<Vec<Restaurant>>;

    /// Case-insensitive substring match on the name
    async fn search_by_name(&self, query: &str) -> Result<Vec<Restaurant>>;
}

/// Menu queries on top of [`DataStore`]
#[async_trait]
pub trait MenuStore: DataStore<MenuItem> {
    /// Available items, newest first
    async fn list_available(&self) -> Result<Vec<MenuItem>>;

    /// Available items for one restaurant
    async fn find_by_restaurant(&self, restaurant_id: &Uuid) -> Result<Vec<MenuItem>>;
}

/// User profiles, keyed by opaque uid rather than UUID
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: User) -> Result<User>;

    async fn get(&self, uid: &str) -> Result<Option<User>>;

    /// Replace an existing profile; `None` when absent
    async fn replace(&self, uid: &str, user: User) -> Result<Option<User>>;

    /// Delete by uid; `false` when absent
    async fn delete(&self, uid: &str) -> Result<bool>;
}
