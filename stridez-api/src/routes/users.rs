//! User listing endpoint
//!
//! # Endpoint
//!
//! ```text
//! GET /users
//! GET /get_user.php   (legacy alias)
//! ```
//!
//! # Response
//!
//! A JSON array with one object per `users` row, keys in column order:
//!
//! ```json
//! [
//!   {"id": 1, "name": "Alice"},
//!   {"id": 2, "name": "Bob"}
//! ]
//! ```
//!
//! An empty table yields `[]`. If the database cannot be reached the response
//! is `503` with a JSON error object.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use stridez_shared::models::{row::Row, user::fetch_all_users};

/// Path of the user listing
pub const USERS_PATH: &str = "/users";

/// Path the listing was served from before this service existed
pub const LEGACY_USERS_PATH: &str = "/get_user.php";

/// Lists every user row
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<Row>>> {
    let rows = fetch_all_users(&state.db).await?;

    tracing::info!(count = rows.len(), "Listing users");

    Ok(Json(rows))
}
