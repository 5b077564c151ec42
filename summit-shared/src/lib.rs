//! # Summit Shared Library
//!
//! Types and business logic shared by the Summit API server:
//!
//! - `models`: one module per persisted entity
//! - `auth`: JWT, password hashing, and the session middleware
//! - `db`: connection pool and migration runner
//! - `eligibility`: the access gate walked before every hotel read

pub mod auth;
pub mod db;
pub mod eligibility;
pub mod models;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
