//! # Stridez Shared Library
//!
//! Data access used by the Stridez API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool management
//! - `models`: Row model and the `users` listing

pub mod db;
pub mod models;

/// Current version of the Stridez shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
