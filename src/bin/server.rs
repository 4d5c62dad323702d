//! FoodExpress API server binary
//!
//! Storage backend is chosen at compile time: the default build uses the
//! in-memory stores, `--no-default-features --features mongodb_backend,client`
//! connects to the MongoDB named by `MONGODB_URI`.

use anyhow::Result;
use foodexpress::config::AppConfig;
use foodexpress::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("foodexpress=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        environment = ?config.environment,
        origins = ?config.allowed_origins,
        "starting FoodExpress API"
    );

    let builder = build_server(config).await?;
    builder.serve().await
}

#[cfg(not(feature = "mongodb_backend"))]
async fn build_server(config: AppConfig) -> Result<ServerBuilder> {
    tracing::info!("using in-memory storage");
    Ok(ServerBuilder::new(config).with_in_memory_stores())
}

#[cfg(feature = "mongodb_backend")]
async fn build_server(config: AppConfig) -> Result<ServerBuilder> {
    use anyhow::Context;
    use foodexpress::core::menu::MenuItem;
    use foodexpress::core::restaurant::Restaurant;
    use foodexpress::storage::mongodb::{MongoOrderStore, MongoStore, MongoUserStore};
    use std::sync::Arc;

    let uri = config
        .mongodb_uri
        .clone()
        .context("MONGODB_URI is required with the mongodb_backend feature")?;

    let client = mongodb::Client::with_uri_str(&uri)
        .await
        .context("failed to connect to MongoDB")?;
    let database = client.database(&config.database_name);
    tracing::info!(database = %config.database_name, "connected to MongoDB");

    let orders = MongoOrderStore::new(database.clone());
    orders.ensure_indexes().await?;

    let restaurants: MongoStore<Restaurant> = MongoStore::new(database.clone());
    let menu: MongoStore<MenuItem> = MongoStore::new(database.clone());
    let users = MongoUserStore::new(database);

    Ok(ServerBuilder::new(config).with_stores(
        Arc::new(orders),
        Arc::new(restaurants),
        Arc::new(menu),
        Arc::new(users),
    ))
}
