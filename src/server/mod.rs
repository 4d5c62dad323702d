//! HTTP surface: router, handlers, and the server builder

pub mod builder;
pub mod handlers;

pub use builder::ServerBuilder;

use crate::config::AppConfig;
use crate::service::menu::MenuService;
use crate::service::orders::OrderService;
use crate::service::restaurants::RestaurantService;
use crate::service::users::UserService;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
    pub restaurants: RestaurantService,
    pub menu: MenuService,
    pub users: UserService,
    pub config: Arc<AppConfig>,
    pub started_at: Instant,
}

/// All routes under `/api`
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/orders",
            post(handlers::orders::create).get(handlers::orders::list),
        )
        .route(
            "/api/orders/{id}",
            get(handlers::orders::get_by_id)
                .patch(handlers::orders::update_status)
                .delete(handlers::orders::delete),
        )
        .route(
            "/api/orders/{id}/auto-update-status",
            post(handlers::orders::auto_update_status),
        )
        .route(
            "/api/orders/user/{user_id}",
            get(handlers::orders::list_by_user),
        )
        .route(
            "/api/restaurants",
            get(handlers::restaurants::list).post(handlers::restaurants::create),
        )
        .route(
            "/api/restaurants/{id}",
            get(handlers::restaurants::get_by_id)
                .put(handlers::restaurants::update)
                .delete(handlers::restaurants::delete),
        )
        .route(
            "/api/restaurants/cuisine/{cuisine}",
            get(handlers::restaurants::by_cuisine),
        )
        .route(
            "/api/restaurants/search/{query}",
            get(handlers::restaurants::search),
        )
        .route(
            "/api/menu",
            get(handlers::menu::list).post(handlers::menu::create),
        )
        .route(
            "/api/menu/restaurant/{restaurant_id}",
            get(handlers::menu::list_by_restaurant),
        )
        .route(
            "/api/menu/{id}",
            get(handlers::menu::get_by_id)
                .put(handlers::menu::update)
                .delete(handlers::menu::delete),
        )
        .route("/api/users", post(handlers::users::create))
        .route(
            "/api/users/{uid}",
            get(handlers::users::get_by_uid)
                .patch(handlers::users::update)
                .delete(handlers::users::delete),
        )
        .route(
            "/api/users/{uid}/address",
            patch(handlers::users::save_address),
        )
        .route(
            "/api/users/{uid}/address/{address_id}",
            delete(handlers::users::remove_address),
        )
        .with_state(state)
}
