//! # Stridez API Server
//!
//! HTTP server exposing the `users` table as a JSON array.
//!
//! ## Usage
//!
//! ```bash
//! DB_HOST=localhost DB_USER=postgres DB_NAME=stridez cargo run -p stridez-api
//! curl http://localhost:8080/users
//! ```

use stridez_api::{
    app::{build_router, AppState},
    config::Config,
};
use stridez_shared::db::pool::{close_pool, create_pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stridez_api=debug,stridez_shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Stridez API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let pool = create_pool(config.pool_config()).await.map_err(|err| {
        tracing::error!(error = %err, "Database connection failed");
        err
    })?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(pool.clone(), config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
