//! Database models for Stridez
//!
//! # Models
//!
//! - `row`: Generic ordered column/value record with JSON mapping
//! - `user`: Listing of the `users` table

pub mod row;
pub mod user;
