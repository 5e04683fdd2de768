//! Error handling for the API server
//!
//! This module provides a unified error type that maps to HTTP responses.
//! Handlers return `Result<T, ApiError>`, and every error becomes a JSON body
//! of the form `{"error": "<code>", "message": "<text>"}`.
//!
//! # Example
//!
//! ```
//! use stridez_api::error::{ApiError, ApiResult};
//! use axum::Json;
//!
//! async fn handler() -> ApiResult<Json<Vec<String>>> {
//!     Err(ApiError::DatabaseUnavailable("connection refused".to_string()))
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use stridez_shared::models::user::UserQueryError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Not found (404)
    NotFound(String),

    /// Database could not be reached (503)
    DatabaseUnavailable(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "database_unavailable")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseUnavailable(msg) => write!(f, "Database unavailable: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::DatabaseUnavailable(msg) => {
                // Driver details stay in the logs
                tracing::error!("Database connection failed: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "database_unavailable",
                    "Database connection failed".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert user listing errors to API errors
impl From<UserQueryError> for ApiError {
    fn from(err: UserQueryError) -> Self {
        if err.is_connection_failure() {
            ApiError::DatabaseUnavailable(err.to_string())
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}
