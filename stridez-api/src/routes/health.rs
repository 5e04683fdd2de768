//! Health check endpoint
//!
//! Provides a simple health check endpoint that verifies:
//! - The server is running
//! - Database connectivity
//!
//! # Endpoint
//!
//! ```text
//! GET /health
//! ```
//!
//! # Response
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "database": "connected",
//!   "pool": {"active_connections": 0, "idle_connections": 1, "total_connections": 1}
//! }
//! ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::Serialize;
use stridez_shared::db::pool::{get_pool_stats, health_check as database_health_check, PoolStats};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,

    /// Connection pool usage
    pub pool: PoolStats,
}

/// Health check handler
///
/// Always responds 200; a failed database check reports `degraded`.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_status = match database_health_check(&state.db).await {
        Ok(()) => "connected",
        Err(err) => {
            tracing::warn!(error = %err, "Database health check failed");
            "disconnected"
        }
    };

    Ok(Json(HealthResponse {
        status: if database_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
        pool: get_pool_stats(&state.db),
    }))
}
