//! Configuration management for the API server
//!
//! This module loads configuration from environment variables (and a `.env`
//! file, if present) into a type-safe configuration struct.
//!
//! # Environment Variables
//!
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to bind to (default: 8080)
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `DATABASE_URL`: Full PostgreSQL connection string; overrides the `DB_*` variables
//! - `DB_HOST`: Database host (default: localhost)
//! - `DB_PORT`: Database port (default: 5432)
//! - `DB_USER`: Database user (default: postgres)
//! - `DB_PASSWORD`: Database password (default: empty)
//! - `DB_NAME`: Database name (default: stridez)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
//! - `DATABASE_ACQUIRE_TIMEOUT_SECONDS`: Pool checkout timeout (default: 5)
//! - `RUST_LOG`: Log filter
//!
//! The request timeout must exceed the acquire timeout, otherwise an
//! unreachable database would surface as a timed-out request.
//!
//! # Example
//!
//! ```no_run
//! use stridez_api::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Server will listen on {}", config.bind_address());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use stridez_shared::db::pool::DatabaseConfig;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseSettings,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Upper bound on the time spent handling a single request
    pub request_timeout_seconds: u64,
}

/// Database connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Full connection URL; when set, the discrete fields are ignored
    pub url: Option<String>,

    pub host: String,

    pub port: u16,

    pub username: String,

    pub password: String,

    pub name: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// How long a request waits for a pooled connection
    pub acquire_timeout_seconds: u64,
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_seconds", &self.acquire_timeout_seconds)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable has an invalid value, or if the
    /// request timeout does not exceed the acquire timeout.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    ///
    /// Unset or empty values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let defaults = DatabaseConfig::default();

        let config = Self {
            api: ApiConfig {
                host: get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&get, "API_PORT", 8080)?,
                request_timeout_seconds: parse_or(&get, "API_REQUEST_TIMEOUT_SECONDS", 30)?,
            },
            database: DatabaseSettings {
                url: get("DATABASE_URL"),
                host: get("DB_HOST").unwrap_or(defaults.host),
                port: parse_or(&get, "DB_PORT", defaults.port)?,
                username: get("DB_USER").unwrap_or(defaults.username),
                // An empty password is meaningful, so it bypasses the empty-value filter
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                name: get("DB_NAME").unwrap_or(defaults.database),
                max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
                acquire_timeout_seconds: parse_or(
                    &get,
                    "DATABASE_ACQUIRE_TIMEOUT_SECONDS",
                    defaults.acquire_timeout_seconds,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks relations between settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api.request_timeout_seconds <= self.database.acquire_timeout_seconds {
            anyhow::bail!(
                "API_REQUEST_TIMEOUT_SECONDS ({}) must be greater than DATABASE_ACQUIRE_TIMEOUT_SECONDS ({})",
                self.api.request_timeout_seconds,
                self.database.acquire_timeout_seconds
            );
        }
        Ok(())
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_seconds)
    }

    /// Pool configuration derived from the database settings
    pub fn pool_config(&self) -> DatabaseConfig {
        let db = &self.database;
        DatabaseConfig {
            url: db.url.clone(),
            host: db.host.clone(),
            port: db.port,
            username: db.username.clone(),
            password: db.password.clone(),
            database: db.name.clone(),
            max_connections: db.max_connections,
            acquire_timeout_seconds: db.acquire_timeout_seconds,
            ..Default::default()
        }
    }
}

fn parse_or<T, F>(get: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|err| anyhow::anyhow!("{} has invalid value {:?}: {}", key, raw, err)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.database.url.is_none());
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.username, "postgres");
        assert_eq!(config.database.password, "");
        assert_eq!(config.database.name, "stridez");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.acquire_timeout_seconds, 5);
        assert!(config.api.request_timeout_seconds > config.database.acquire_timeout_seconds);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "9000"),
            ("API_REQUEST_TIMEOUT_SECONDS", "5"),
            ("DB_HOST", "db"),
            ("DB_USER", "reader"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "people"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECONDS", "2"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));

        let pool = config.pool_config();
        assert_eq!(pool.host, "db");
        assert_eq!(pool.username, "reader");
        assert_eq!(pool.password, "hunter2");
        assert_eq!(pool.database, "people");
        assert_eq!(pool.max_connections, 4);
        assert_eq!(pool.acquire_timeout_seconds, 2);
    }

    #[test]
    fn test_request_timeout_must_exceed_acquire_timeout() {
        let err = config_from(&[
            ("API_REQUEST_TIMEOUT_SECONDS", "2"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECONDS", "2"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("API_REQUEST_TIMEOUT_SECONDS"));
        assert!(err.to_string().contains("DATABASE_ACQUIRE_TIMEOUT_SECONDS"));

        // The acquire default alone is enough to trip it
        assert!(config_from(&[("API_REQUEST_TIMEOUT_SECONDS", "4")]).is_err());

        assert!(config_from(&[
            ("API_REQUEST_TIMEOUT_SECONDS", "3"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECONDS", "2"),
        ])
        .is_ok());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("API_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = config_from(&[
            ("DB_PASSWORD", "hunter2"),
            ("DATABASE_URL", "postgresql://u:hunter2@db/stridez"),
        ])
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
    }
}
