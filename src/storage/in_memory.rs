//! In-memory storage backend for testing and development
//!
//! `Arc<RwLock<HashMap>>` per collection; clones share the underlying map,
//! which is what lets integration tests keep a handle on a store that is
//! also wired into a running router.

use crate::core::menu::MenuItem;
use crate::core::order::{Order, OrderStatus};
use crate::core::restaurant::Restaurant;
use crate::core::user::User;
use crate::storage::{DataStore, Document, MenuStore, OrderStore, RestaurantStore, UserStore};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Generic in-memory document collection
#[derive(Clone)]
pub struct InMemoryStore<T> {
    docs: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            docs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> InMemoryStore<T> {
    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<Uuid, T>>> {
        self.docs
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, T>>> {
        self.docs
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }

    fn sorted_newest_first(mut docs: Vec<T>) -> Vec<T> {
        docs.sort_by_key(|d| std::cmp::Reverse(d.created_at()));
        docs
    }
}

#[async_trait]
impl<T: Document> DataStore<T> for InMemoryStore<T> {
    async fn insert(&self, doc: T) -> Result<T> {
        self.write()?.insert(doc.id(), doc.clone());
        Ok(doc)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let docs: Vec<T> = self.read()?.values().cloned().collect();
        Ok(Self::sorted_newest_first(docs))
    }

    async fn replace(&self, id: &Uuid, doc: T) -> Result<Option<T>> {
        let mut docs = self.write()?;
        if !docs.contains_key(id) {
            return Ok(None);
        }
        docs.insert(*id, doc.clone());
        Ok(Some(doc))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        Ok(self.write()?.remove(id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        self.read().map(|_| ())
    }
}

/// In-memory order collection with the order-specific queries
pub type InMemoryOrderStore = InMemoryStore<Order>;

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>> {
        Ok(self
            .read()?
            .values()
            .find(|o| o.order_number == order_number)
            .cloned())
    }

    async fn page_by_user(
        &self,
        user_id: &str,
        skip: u64,
        limit: u64,
    ) -> Result<(Vec<Order>, u64)> {
        let mine: Vec<Order> = self
            .read()?
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        let total = mine.len() as u64;
        let page = Self::sorted_newest_first(mine)
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn set_status(&self, id: &Uuid, status: OrderStatus) -> Result<Option<Order>> {
        let mut docs = self.write()?;
        Ok(docs.get_mut(id).map(|order| {
            order.status = status;
            order.clone()
        }))
    }

    async fn set_status_if(
        &self,
        id: &Uuid,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<Order>> {
        // Check-and-set under a single write lock
        let mut docs = self.write()?;
        match docs.get_mut(id) {
            Some(order) if order.status == expected => {
                order.status = next;
                Ok(Some(order.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<u64> {
        let mut docs = self.write()?;
        let before = docs.len();
        docs.retain(|_, order| order.user_id != user_id);
        Ok((before - docs.len()) as u64)
    }
}

#[async_trait]
impl RestaurantStore for InMemoryStore<Restaurant> {
    async fn list_active(&self) -> Result<Vec<Restaurant>> {
        let active: Vec<Restaurant> = self
            .read()?
            .values()
            .filter(|r| r.is_active)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(active))
    }

    async fn find_by_cuisine(&self, cuisine: &str) -> Result<Vec<Restaurant>> {
        let matching: Vec<Restaurant> = self
            .read()?
            .values()
            .filter(|r| r.cuisine == cuisine)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(matching))
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<Restaurant>> {
        let needle = query.to_lowercase();
        let matching: Vec<Restaurant> = self
            .read()?
            .values()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(matching))
    }
}

#[async_trait]
impl MenuStore for InMemoryStore<MenuItem> {
    async fn list_available(&self) -> Result<Vec<MenuItem>> {
        let available: Vec<MenuItem> = self
            .read()?
            .values()
            .filter(|m| m.is_available)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(available))
    }

    async fn find_by_restaurant(&self, restaurant_id: &Uuid) -> Result<Vec<MenuItem>> {
        let matching: Vec<MenuItem> = self
            .read()?
            .values()
            .filter(|m| &m.restaurant_id == restaurant_id && m.is_available)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(matching))
    }
}

/// In-memory user profiles, keyed by uid
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, User>>> {
        self.users
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<User> {
        self.write()?.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get(&self, uid: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?
            .get(uid)
            .cloned())
    }

    async fn replace(&self, uid: &str, user: User) -> Result<Option<User>> {
        let mut users = self.write()?;
        if !users.contains_key(uid) {
            return Ok(None);
        }
        users.insert(uid.to_string(), user.clone());
        Ok(Some(user))
    }

    async fn delete(&self, uid: &str) -> Result<bool> {
        Ok(self.write()?.remove(uid).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::{DeliveryAddress, PaymentMethod};
    use chrono::{Duration, Utc};

    fn order(user_id: &str, number: &str, status: OrderStatus) -> Order {
        Order {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            items: vec![],
            total: 100.0,
            status,
            order_number: number.to_string(),
            created_at: Utc::now(),
            payment_method: PaymentMethod::Cash,
            delivery_address: DeliveryAddress::FreeText("somewhere".to_string()),
        }
    }

    #[tokio::test]
    async fn insert_get_delete_roundtrip() {
        let store = InMemoryOrderStore::new();
        let order = order("uid-1", "ORD-11111", OrderStatus::Processing);
        let id = order.id;

        store.insert(order).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_some());
        assert!(store.delete(&id).await.unwrap());
        assert!(store.get(&id).await.unwrap().is_none());
        assert!(!store.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = InMemoryOrderStore::new();
        let mut old = order("uid-1", "ORD-00001", OrderStatus::Processing);
        old.created_at = Utc::now() - Duration::minutes(10);
        let new = order("uid-1", "ORD-00002", OrderStatus::Processing);

        store.insert(old).await.unwrap();
        store.insert(new).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].order_number, "ORD-00002");
        assert_eq!(listed[1].order_number, "ORD-00001");
    }

    #[tokio::test]
    async fn replace_missing_returns_none() {
        let store = InMemoryOrderStore::new();
        let order = order("uid-1", "ORD-11111", OrderStatus::Processing);
        assert!(store.replace(&order.id, order.clone()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_order_number_matches_exactly() {
        let store = InMemoryOrderStore::new();
        store
            .insert(order("uid-1", "ORD-11111", OrderStatus::Processing))
            .await
            .unwrap();

        assert!(store
            .find_by_order_number("ORD-11111")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_order_number("ORD-99999")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn page_by_user_paginates_newest_first() {
        let store = InMemoryOrderStore::new();
        for i in 0..5 {
            let mut o = order("uid-1", &format!("ORD-0000{i}"), OrderStatus::Processing);
            o.created_at = Utc::now() - Duration::minutes(10 - i);
            store.insert(o).await.unwrap();
        }
        store
            .insert(order("uid-2", "ORD-55555", OrderStatus::Processing))
            .await
            .unwrap();

        let (page, total) = store.page_by_user("uid-1", 0, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].order_number, "ORD-00004");

        let (rest, _) = store.page_by_user("uid-1", 4, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
    }

    #[tokio::test]
    async fn set_status_if_applies_only_on_expected() {
        let store = InMemoryOrderStore::new();
        let o = order("uid-1", "ORD-11111", OrderStatus::Processing);
        let id = o.id;
        store.insert(o).await.unwrap();

        // Wrong expectation: no write
        let missed = store
            .set_status_if(&id, OrderStatus::Preparing, OrderStatus::OutForDelivery)
            .await
            .unwrap();
        assert!(missed.is_none());
        assert_eq!(
            store.get(&id).await.unwrap().unwrap().status,
            OrderStatus::Processing
        );

        // Matching expectation: applied
        let updated = store
            .set_status_if(&id, OrderStatus::Processing, OrderStatus::Preparing)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn delete_by_user_removes_only_their_orders() {
        let store = InMemoryOrderStore::new();
        store
            .insert(order("uid-1", "ORD-00001", OrderStatus::Processing))
            .await
            .unwrap();
        store
            .insert(order("uid-1", "ORD-00002", OrderStatus::Delivered))
            .await
            .unwrap();
        store
            .insert(order("uid-2", "ORD-00003", OrderStatus::Processing))
            .await
            .unwrap();

        assert_eq!(store.delete_by_user("uid-1").await.unwrap(), 2);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clones_share_the_same_map() {
        let store = InMemoryOrderStore::new();
        let alias = store.clone();
        let o = order("uid-1", "ORD-11111", OrderStatus::Processing);
        let id = o.id;
        store.insert(o).await.unwrap();
        assert!(alias.get(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn user_store_roundtrip() {
        let store = InMemoryUserStore::new();
        let user = User::new("uid-1".into(), "Asha".into(), "asha@example.com".into());
        store.insert(user.clone()).await.unwrap();

        assert!(store.get("uid-1").await.unwrap().is_some());
        assert!(store.replace("uid-1", user.clone()).await.unwrap().is_some());
        assert!(store.replace("uid-2", user).await.unwrap().is_none());
        assert!(store.delete("uid-1").await.unwrap());
        assert!(!store.delete("uid-1").await.unwrap());
    }
}
