//! API error taxonomy and HTTP response mapping
//!
//! Every recoverable failure is turned into a structured 4xx response with
//! the wire shape `{message, errors?}`, where `errors` is a list of
//! per-field messages. Unexpected failures (storage unavailable, bugs)
//! surface as 5xx with a generic message; the detail is logged server-side
//! and only included in the body in debug builds.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error type returned by all services and handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist
    #[error("{resource} not found")]
    NotFound {
        /// Human-facing resource name, e.g. "Order"
        resource: &'static str,
    },

    /// Malformed or out-of-range input, with per-field messages
    #[error("Validation Error")]
    Validation(Vec<String>),

    /// A unique field collided with an existing document
    #[error("Duplicate field value entered")]
    Conflict {
        /// The offending field, e.g. "orderNumber"
        field: &'static str,
    },

    /// Missing or invalid credentials
    #[error("Invalid token")]
    Unauthorized,

    /// Credentials were valid once but have expired
    #[error("Token expired")]
    TokenExpired,

    /// Storage or other unexpected failure
    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Shorthand for a not-found error on a named resource
    pub fn not_found(resource: &'static str) -> Self {
        ApiError::NotFound { resource }
    }

    /// A validation error with a single message
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Validation(vec![message.into()])
    }

    /// The HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Unauthorized | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the wire body for this error
    pub fn to_body(&self) -> ErrorBody {
        let errors = match self {
            ApiError::Validation(messages) => Some(messages.clone()),
            ApiError::Conflict { field } => Some(vec![format!("{field} already exists")]),
            // Debug builds expose the underlying cause to ease local work;
            // release builds withhold it from the client.
            #[cfg(debug_assertions)]
            ApiError::Internal(err) => Some(vec![err.to_string()]),
            _ => None,
        };

        ErrorBody {
            message: self.to_string(),
            errors,
        }
    }
}

/// Wire shape of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, source = ?self, "request failed");
        }
        (status, Json(self.to_body())).into_response()
    }
}

/// A specialized Result for API operations
pub type ApiResult<T> = Result<T, ApiError>;
