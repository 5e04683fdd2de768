//! Application state and router builder
//!
//! This module defines the shared application state and provides
//! a function to build the Axum router with all routes and middleware.
//!
//! # Example
//!
//! ```no_run
//! use stridez_api::{app::{build_router, AppState}, config::Config};
//! use stridez_shared::db::pool::create_pool;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = create_pool(config.pool_config()).await?;
//! let state = AppState::new(pool, config);
//!
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use crate::{config::Config, routes};
use axum::{routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET /health          # Health check
/// ├── GET /users           # All rows of the users table
/// └── GET /get_user.php    # Legacy alias of /users
/// ```
///
/// Every request is traced and bounded by the configured request timeout
/// (`408 Request Timeout` when exceeded). Unknown paths get a JSON 404.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout();

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(routes::users::USERS_PATH, get(routes::users::list_users))
        .route(routes::users::LEGACY_USERS_PATH, get(routes::users::list_users))
        .fallback(routes::not_found)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
