//! Database layer for Stridez
//!
//! # Modules
//!
//! - `pool`: PostgreSQL connection pool management with health checks
//!
//! # Example
//!
//! ```no_run
//! use stridez_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: Some(std::env::var("DATABASE_URL")?),
//!         ..Default::default()
//!     };
//!
//!     let pool = create_pool(config).await?;
//!     Ok(())
//! }
//! ```

pub mod pool;
