//! User listing
//!
//! Reads every record of the `users` table as generic [`Row`]s. The table's
//! schema is owned elsewhere; whatever columns it has are returned in the
//! order PostgreSQL reports them.
//!
//! # Example
//!
//! ```no_run
//! use stridez_shared::db::pool::{create_pool, DatabaseConfig};
//! use stridez_shared::models::user::fetch_all_users;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//!
//! let users = fetch_all_users(&pool).await?;
//! println!("Fetched {} users", users.len());
//! # Ok(())
//! # }
//! ```

use crate::models::row::Row;
use sqlx::{Executor, FromRow, PgPool};
use thiserror::Error;
use tracing::debug;

/// The one query this module runs
pub const SELECT_ALL_USERS: &str = "SELECT * FROM users";

/// Errors from listing users
#[derive(Error, Debug)]
pub enum UserQueryError {
    /// No connection could be obtained, or it broke mid-query
    #[error("Database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// The query itself failed (e.g., missing table)
    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// A column value could not be mapped to a `ColumnValue`
    #[error("Row decode failed: {0}")]
    Decode(#[source] sqlx::Error),
}

impl UserQueryError {
    /// Classifies an error raised while a connection was already held
    fn from_query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => UserQueryError::Connection(err),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                UserQueryError::Decode(err)
            }
            _ => UserQueryError::Query(err),
        }
    }

    /// Whether the database was unreachable, as opposed to a failed query
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, UserQueryError::Connection(_))
    }
}

/// Fetches all rows of the `users` table
///
/// Checks one connection out of the pool for the duration of the query; the
/// connection goes back to the pool on every return path. The query runs
/// unprepared, so every value arrives in PostgreSQL's text format and types
/// without a dedicated mapping keep their textual rendering.
///
/// # Errors
///
/// - `UserQueryError::Connection` if no connection can be acquired
/// - `UserQueryError::Query` if the query fails
/// - `UserQueryError::Decode` if a value has no JSON mapping
pub async fn fetch_all_users(pool: &PgPool) -> Result<Vec<Row>, UserQueryError> {
    let mut conn = pool.acquire().await.map_err(UserQueryError::Connection)?;
    debug!("Checked out database connection");

    let result = (&mut *conn).fetch_all(SELECT_ALL_USERS).await;

    drop(conn);
    debug!("Released database connection");

    let rows = result
        .map_err(UserQueryError::from_query)?
        .iter()
        .map(Row::from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(UserQueryError::from_query)?;
    debug!(rows = rows.len(), "Fetched users");
    Ok(rows)
}
