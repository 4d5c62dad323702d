//! End-to-end order lifecycle tests against the full router

use axum_test::TestServer;
use chrono::{Duration, Utc};
use foodexpress::config::AppConfig;
use foodexpress::core::order::{Order, OrderStatus};
use foodexpress::server::ServerBuilder;
use foodexpress::storage::in_memory::{InMemoryOrderStore, InMemoryStore, InMemoryUserStore};
use foodexpress::storage::DataStore;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Router plus a handle on the order store so tests can age orders
fn test_server() -> (TestServer, InMemoryOrderStore) {
    let orders = InMemoryOrderStore::new();
    let app = ServerBuilder::new(AppConfig::default())
        .with_stores(
            Arc::new(orders.clone()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryUserStore::new()),
        )
        .build()
        .expect("router should build");
    (TestServer::new(app), orders)
}

fn pizza_checkout() -> Value {
    json!({
        "userId": "uid-1",
        "items": [
            {
                "name": "Pizza",
                "price": 300.0,
                "quantity": 2,
                "restaurantName": "Mario's Pizzeria"
            }
        ],
        "total": 686.0,
        "paymentMethod": {
            "type": "credit",
            "details": {
                "cardNumber": "4111111111111111",
                "cardName": "Asha K",
                "cardExpiry": "12/27"
            }
        },
        "deliveryAddress": "12 MG Road, Mumbai, MH, 400001"
    })
}

async fn backdate(store: &InMemoryOrderStore, id: &Uuid, minutes: i64) {
    let mut order = store.get(id).await.unwrap().unwrap();
    order.created_at = Utc::now() - Duration::minutes(minutes);
    store.replace(id, order).await.unwrap();
}

#[tokio::test]
async fn checkout_returns_created_order_with_server_fields() {
    let (server, _) = test_server();

    let response = server.post("/api/orders").json(&pizza_checkout()).await;
    assert_eq!(response.status_code(), 201);

    let order: Order = response.json();
    assert_eq!(order.status, OrderStatus::Processing);
    // Total is accepted as supplied, not recomputed from items
    assert_eq!(order.total, 686.0);
    assert!(order.order_number.starts_with("ORD-"));
    assert_eq!(order.items.len(), 1);
}

#[tokio::test]
async fn invalid_checkout_is_rejected_with_field_errors() {
    let (server, _) = test_server();

    let response = server
        .post("/api/orders")
        .json(&json!({
            "userId": "",
            "items": [],
            "total": -5.0,
            "paymentMethod": {"type": "cash"},
            "deliveryAddress": "x"
        }))
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["message"], "Validation Error");
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e.as_str().unwrap().contains("User ID is required")));
    assert!(errors
        .iter()
        .any(|e| e.as_str().unwrap().contains("Items must be a non-empty array")));
    assert!(errors
        .iter()
        .any(|e| e.as_str().unwrap().contains("Total amount must be a positive number")));
}

#[tokio::test]
async fn fresh_order_does_not_advance() {
    let (server, _) = test_server();

    let order: Order = server.post("/api/orders").json(&pizza_checkout()).await.json();
    let fetched: Order = server.get(&format!("/api/orders/{}", order.id)).await.json();
    assert_eq!(fetched.status, OrderStatus::Processing);

    let advanced: Order = server
        .post(&format!("/api/orders/{}/auto-update-status", order.id))
        .await
        .json();
    assert_eq!(advanced.status, OrderStatus::Processing);
}

#[tokio::test]
async fn plain_fetch_never_writes() {
    let (server, store) = test_server();
    let order: Order = server.post("/api/orders").json(&pizza_checkout()).await.json();
    backdate(&store, &order.id, 16).await;

    let fetched: Order = server.get(&format!("/api/orders/{}", order.id)).await.json();
    assert_eq!(fetched.status, OrderStatus::Processing);
}

#[tokio::test]
async fn auto_update_walks_an_aged_order_one_step_per_call() {
    let (server, store) = test_server();
    let order: Order = server.post("/api/orders").json(&pizza_checkout()).await.json();

    // Order placed sixteen minutes ago but never polled
    backdate(&store, &order.id, 16).await;
    let path = format!("/api/orders/{}/auto-update-status", order.id);

    let call_1: Order = server.post(&path).await.json();
    assert_eq!(call_1.status, OrderStatus::Preparing);

    let call_2: Order = server.post(&path).await.json();
    assert_eq!(call_2.status, OrderStatus::OutForDelivery);

    let call_3: Order = server.post(&path).await.json();
    assert_eq!(call_3.status, OrderStatus::Delivered);

    // Delivered is settled; further calls change nothing
    let call_4: Order = server.post(&path).await.json();
    assert_eq!(call_4.status, OrderStatus::Delivered);
}

#[tokio::test]
async fn cancelled_order_never_advances_regardless_of_age() {
    let (server, store) = test_server();
    let order: Order = server.post("/api/orders").json(&pizza_checkout()).await.json();

    let response = server
        .patch(&format!("/api/orders/{}", order.id))
        .json(&json!({"status": "cancelled"}))
        .await;
    assert_eq!(response.status_code(), 200);

    backdate(&store, &order.id, 120).await;
    let result: Order = server
        .post(&format!("/api/orders/{}/auto-update-status", order.id))
        .await
        .json();
    assert_eq!(result.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn manual_update_accepts_every_known_token_and_may_revert() {
    let (server, _) = test_server();
    let order: Order = server.post("/api/orders").json(&pizza_checkout()).await.json();
    let path = format!("/api/orders/{}", order.id);

    for status in [
        "pending",
        "processing",
        "preparing",
        "outForDelivery",
        "delivered",
        "completed",
        "cancelled",
        "processing",
    ] {
        let response = server.patch(&path).json(&json!({"status": status})).await;
        assert_eq!(response.status_code(), 200, "token {status}");
        let updated: Order = response.json();
        assert_eq!(updated.status.as_str(), status);
    }
}

#[tokio::test]
async fn unknown_status_token_is_rejected_and_nothing_is_written() {
    let (server, _) = test_server();
    let order: Order = server.post("/api/orders").json(&pizza_checkout()).await.json();
    let path = format!("/api/orders/{}", order.id);

    let response = server.patch(&path).json(&json!({"status": "shipped"})).await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["message"], "Validation Error");
    assert!(body["errors"][0]
        .as_str()
        .unwrap()
        .contains("Invalid status"));

    let fetched: Order = server.get(&path).await.json();
    assert_eq!(fetched.status, OrderStatus::Processing);
}

#[tokio::test]
async fn missing_order_is_a_structured_404_on_every_route() {
    let (server, _) = test_server();
    let id = Uuid::new_v4();

    for response in [
        server.get(&format!("/api/orders/{id}")).await,
        server.post(&format!("/api/orders/{id}/auto-update-status")).await,
        server
            .patch(&format!("/api/orders/{id}"))
            .json(&json!({"status": "preparing"}))
            .await,
        server.delete(&format!("/api/orders/{id}")).await,
    ] {
        assert_eq!(response.status_code(), 404);
        let body: Value = response.json();
        assert_eq!(body["message"], "Order not found");
        assert!(body.get("errors").is_none());
    }
}

#[tokio::test]
async fn user_history_is_paginated_newest_first() {
    let (server, _) = test_server();
    for _ in 0..3 {
        server.post("/api/orders").json(&pizza_checkout()).await;
    }

    let response = server.get("/api/orders/user/uid-1?page=1&limit=2").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["orders"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["pages"], 2);

    let rest: Value = server.get("/api/orders/user/uid-1?page=2&limit=2").await.json();
    assert_eq!(rest["orders"].as_array().unwrap().len(), 1);

    let other: Value = server.get("/api/orders/user/uid-9").await.json();
    assert!(other["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn absurd_page_numbers_return_an_empty_page_instead_of_panicking() {
    let (server, _) = test_server();
    server.post("/api/orders").json(&pizza_checkout()).await;

    let response = server
        .get(&format!("/api/orders/user/uid-1?page={}&limit=100", u64::MAX))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert!(body["orders"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn delete_order_then_404() {
    let (server, _) = test_server();
    let order: Order = server.post("/api/orders").json(&pizza_checkout()).await.json();
    let path = format!("/api/orders/{}", order.id);

    let response = server.delete(&path).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Order deleted successfully");

    assert_eq!(server.delete(&path).await.status_code(), 404);
}

#[tokio::test]
async fn health_reports_connected_store() {
    let (server, _) = test_server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}
