//! MongoDB storage backend
//!
//! Gated behind the `mongodb_backend` feature:
//!
//! ```toml
//! [dependencies]
//! foodexpress = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! Each document type gets its own collection, named by
//! [`Document::collection_name`]. Entities are serialized through
//! `serde_json::Value` into BSON so the wire representation (camelCase
//! fields, string UUIDs, ISO 8601 timestamps) and the stored representation
//! stay identical; the `id` field maps to MongoDB's `_id`.

use crate::core::menu::MenuItem;
use crate::core::order::{Order, OrderStatus};
use crate::core::restaurant::Restaurant;
use crate::core::user::User;
use crate::storage::{DataStore, Document, MenuStore, OrderStore, RestaurantStore, UserStore};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document as BsonDocument};
use mongodb::options::ReturnDocument;
use mongodb::{Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// JSON object → BSON document, renaming `id` → `_id`.
fn json_to_bson_doc(json: serde_json::Value) -> Result<BsonDocument> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// BSON document → JSON, renaming `_id` → `id`.
fn bson_doc_to_json(mut doc: BsonDocument) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn status_bson(status: OrderStatus) -> Bson {
    Bson::String(status.as_str().to_string())
}

fn to_doc<T: Serialize>(value: &T) -> Result<BsonDocument> {
    let json =
        serde_json::to_value(value).map_err(|e| anyhow!("Failed to serialize document: {}", e))?;
    json_to_bson_doc(json)
}

fn from_doc<T: DeserializeOwned>(doc: BsonDocument) -> Result<T> {
    serde_json::from_value(bson_doc_to_json(doc))
        .map_err(|e| anyhow!("Failed to deserialize document: {}", e))
}

// ---------------------------------------------------------------------------
// MongoStore<T>
// ---------------------------------------------------------------------------

/// Generic document store backed by a MongoDB collection
#[derive(Clone, Debug)]
pub struct MongoStore<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoStore<T> {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T: Document> MongoStore<T> {
    fn collection(&self) -> mongodb::Collection<BsonDocument> {
        self.database.collection(T::collection_name())
    }

    async fn find_sorted(&self, filter: BsonDocument) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(|e| anyhow!("Failed to query {}: {}", T::collection_name(), e))?;

        let docs: Vec<BsonDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect {}: {}", T::collection_name(), e))?;

        docs.into_iter().map(from_doc).collect()
    }
}

#[async_trait]
impl<T: Document> DataStore<T> for MongoStore<T> {
    async fn insert(&self, doc: T) -> Result<T> {
        self.collection()
            .insert_one(to_doc(&doc)?)
            .await
            .map_err(|e| anyhow!("Failed to insert into {}: {}", T::collection_name(), e))?;
        Ok(doc)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let found = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get from {}: {}", T::collection_name(), e))?;

        found.map(from_doc).transpose()
    }

    async fn list(&self) -> Result<Vec<T>> {
        self.find_sorted(doc! {}).await
    }

    async fn replace(&self, id: &Uuid, doc: T) -> Result<Option<T>> {
        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(id) }, to_doc(&doc)?)
            .await
            .map_err(|e| anyhow!("Failed to replace in {}: {}", T::collection_name(), e))?;

        Ok((result.matched_count > 0).then_some(doc))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete from {}: {}", T::collection_name(), e))?;

        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| anyhow!("MongoDB ping failed: {}", e))?;
        Ok(())
    }
}

/// Order collection with lifecycle-specific operations
pub type MongoOrderStore = MongoStore<Order>;

impl MongoOrderStore {
    /// Create the indexes the order queries rely on. Idempotent; called on
    /// every startup.
    ///
    /// - unique `orderNumber` — uniqueness across all orders
    /// - `userId: 1, createdAt: -1` — user order history
    /// - `status: 1, createdAt: -1` — status dashboards
    pub async fn ensure_indexes(&self) -> Result<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "orderNumber": 1 })
                .options(
                    mongodb::options::IndexOptions::builder()
                        .unique(true)
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "userId": 1, "createdAt": -1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "status": 1, "createdAt": -1 })
                .build(),
        ];

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| anyhow!("Failed to create indexes on orders: {}", e))?;

        Ok(())
    }
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>> {
        let found = self
            .collection()
            .find_one(doc! { "orderNumber": order_number })
            .await
            .map_err(|e| anyhow!("Failed to query orders by number: {}", e))?;

        found.map(from_doc).transpose()
    }

    async fn page_by_user(
        &self,
        user_id: &str,
        skip: u64,
        limit: u64,
    ) -> Result<(Vec<Order>, u64)> {
        let filter = doc! { "userId": user_id };

        let cursor = self
            .collection()
            .find(filter.clone())
            .sort(doc! { "createdAt": -1 })
            .skip(skip)
            .limit(limit as i64)
            .await
            .map_err(|e| anyhow!("Failed to page orders: {}", e))?;

        let docs: Vec<BsonDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect orders: {}", e))?;

        let total = self
            .collection()
            .count_documents(filter)
            .await
            .map_err(|e| anyhow!("Failed to count orders: {}", e))?;

        let orders = docs
            .into_iter()
            .map(from_doc)
            .collect::<Result<Vec<Order>>>()?;
        Ok((orders, total))
    }

    async fn set_status(&self, id: &Uuid, status: OrderStatus) -> Result<Option<Order>> {
        let updated = self
            .collection()
            .find_one_and_update(
                doc! { "_id": uuid_bson(id) },
                doc! { "$set": { "status": status_bson(status) } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to update order status: {}", e))?;

        updated.map(from_doc).transpose()
    }

    async fn set_status_if(
        &self,
        id: &Uuid,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<Order>> {
        // Single conditional document update; concurrent writers cannot
        // both match the expected status.
        let updated = self
            .collection()
            .find_one_and_update(
                doc! { "_id": uuid_bson(id), "status": status_bson(expected) },
                doc! { "$set": { "status": status_bson(next) } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to conditionally update order status: {}", e))?;

        updated.map(from_doc).transpose()
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<u64> {
        let result = self
            .collection()
            .delete_many(doc! { "userId": user_id })
            .await
            .map_err(|e| anyhow!("Failed to delete orders by user: {}", e))?;

        Ok(result.deleted_count)
    }
}

#[async_trait]
impl RestaurantStore for MongoStore<Restaurant> {
    async fn list_active(&self) -> Result<Vec<Restaurant>> {
        self.find_sorted(doc! { "isActive": true }).await
    }

    async fn find_by_cuisine(&self, cuisine: &str) -> Result<Vec<Restaurant>> {
        self.find_sorted(doc! { "cuisine": cuisine }).await
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<Restaurant>> {
        self.find_sorted(doc! { "name": { "$regex": query, "$options": "i" } })
            .await
    }
}

#[async_trait]
impl MenuStore for MongoStore<MenuItem> {
    async fn list_available(&self) -> Result<Vec<MenuItem>> {
        self.find_sorted(doc! { "isAvailable": true }).await
    }

    async fn find_by_restaurant(&self, restaurant_id: &Uuid) -> Result<Vec<MenuItem>> {
        self.find_sorted(doc! {
            "restaurantId": uuid_bson(restaurant_id),
            "isAvailable": true
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// Users (string-keyed)
// ---------------------------------------------------------------------------

/// User profile store; `_id` is the identity-provider uid, not a UUID
#[derive(Clone, Debug)]
pub struct MongoUserStore {
    database: Database,
}

impl MongoUserStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<BsonDocument> {
        self.database.collection("users")
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: User) -> Result<User> {
        self.collection()
            .insert_one(to_doc(&user)?)
            .await
            .map_err(|e| anyhow!("Failed to insert user: {}", e))?;
        Ok(user)
    }

    async fn get(&self, uid: &str) -> Result<Option<User>> {
        let found = self
            .collection()
            .find_one(doc! { "_id": uid })
            .await
            .map_err(|e| anyhow!("Failed to get user: {}", e))?;

        found.map(from_doc).transpose()
    }

    async fn replace(&self, uid: &str, user: User) -> Result<Option<User>> {
        let result = self
            .collection()
            .replace_one(doc! { "_id": uid }, to_doc(&user)?)
            .await
            .map_err(|e| anyhow!("Failed to replace user: {}", e))?;

        Ok((result.matched_count > 0).then_some(user))
    }

    async fn delete(&self, uid: &str) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uid })
            .await
            .map_err(|e| anyhow!("Failed to delete user: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}
