//! Fluent builder wiring stores, services, middleware, and the listener
//!
//! # Example
//!
//! ```ignore
//! ServerBuilder::new(AppConfig::from_env())
//!     .with_in_memory_stores()
//!     .serve()
//!     .await?;
//! ```

use super::{api_router, AppState};
use crate::config::AppConfig;
use crate::service::menu::MenuService;
use crate::service::orders::OrderService;
use crate::service::restaurants::RestaurantService;
use crate::service::users::UserService;
use crate::storage::in_memory::{InMemoryStore, InMemoryOrderStore, InMemoryUserStore};
use crate::storage::{MenuStore, OrderStore, RestaurantStore, UserStore};
use anyhow::{Context, Result};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct ServerBuilder {
    config: AppConfig,
    stores: Option<Stores>,
}

struct Stores {
    orders: Arc<dyn OrderStore>,
    restaurants: Arc<dyn RestaurantStore>,
    menu: Arc<dyn MenuStore>,
    users: Arc<dyn UserStore>,
}

impl ServerBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            stores: None,
        }
    }

    /// Back every collection with in-process maps; the default for tests
    /// and development.
    pub fn with_in_memory_stores(mut self) -> Self {
        self.stores = Some(Stores {
            orders: Arc::new(InMemoryOrderStore::new()),
            restaurants: Arc::new(InMemoryStore::new()),
            menu: Arc::new(InMemoryStore::new()),
            users: Arc::new(InMemoryUserStore::new()),
        });
        self
    }

    /// Supply explicit store implementations
    pub fn with_stores(
        mut self,
        orders: Arc<dyn OrderStore>,
        restaurants: Arc<dyn RestaurantStore>,
        menu: Arc<dyn MenuStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        self.stores = Some(Stores {
            orders,
            restaurants,
            menu,
            users,
        });
        self
    }

    /// Build the router with CORS and request tracing applied
    pub fn build(self) -> Result<Router> {
        let stores = self
            .stores
            .context("stores are required. Call .with_in_memory_stores() or .with_stores()")?;

        let config = Arc::new(self.config);
        let state = AppState {
            orders: OrderService::new(stores.orders.clone()),
            restaurants: RestaurantService::new(stores.restaurants),
            menu: MenuService::new(stores.menu),
            users: UserService::new(stores.users, stores.orders),
            config: config.clone(),
            started_at: Instant::now(),
        };

        let origins = config
            .allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("invalid CORS origin: {origin}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true);

        Ok(api_router(state).layer(cors).layer(TraceLayer::new_for_http()))
    }

    /// Bind, serve, and shut down gracefully on SIGTERM or Ctrl+C
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
