//! Environment-derived application configuration
//!
//! All process-wide settings are computed once at startup and carried in a
//! shared [`AppConfig`]. In particular the CORS origin list is derived here
//! and passed to the router layer — it is never recomputed per request or
//! per error response.

use serde::{Deserialize, Serialize};

/// Deployment environment, derived from `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Frontend origins allowed in development when `FRONTEND_URL` is unset
const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:5174"];

/// Frontend origin allowed in production when `FRONTEND_URL` is unset
const PROD_ORIGIN: &str = "https://foodexpress.example.com";

/// Process-wide configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address (`HOST`, default `0.0.0.0`)
    pub host: String,

    /// Bind port (`PORT`, default `5003`)
    pub port: u16,

    /// MongoDB connection string (`MONGODB_URI`), required only when the
    /// `mongodb_backend` feature is active
    pub mongodb_uri: Option<String>,

    /// MongoDB database name (`MONGODB_DATABASE`, default `foodexpress`)
    pub database_name: String,

    /// CORS origins allowed for browser requests
    pub allowed_origins: Vec<String>,

    /// Deployment environment
    pub environment: Environment,
}

impl AppConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let frontend_url = std::env::var("FRONTEND_URL").ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5003),
            mongodb_uri: std::env::var("MONGODB_URI").ok(),
            database_name: std::env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "foodexpress".to_string()),
            allowed_origins: allowed_origins(frontend_url.as_deref(), environment),
            environment,
        }
    }

    /// The socket address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5003,
            mongodb_uri: None,
            database_name: "foodexpress".to_string(),
            allowed_origins: allowed_origins(None, Environment::Development),
            environment: Environment::Development,
        }
    }
}

/// Compute the CORS origin list.
///
/// `FRONTEND_URL` (comma-separated) takes priority; otherwise the list
/// depends on the deployment environment.
fn allowed_origins(frontend_url: Option<&str>, environment: Environment) -> Vec<String> {
    if let Some(urls) = frontend_url {
        return urls
            .split(',')
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .collect();
    }

    match environment {
        Environment::Production => vec![PROD_ORIGIN.to_string()],
        Environment::Development => DEV_ORIGINS.iter().map(|o| o.to_string()).collect(),
    }
}
