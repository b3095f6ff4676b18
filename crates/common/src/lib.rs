//! Premiações Common Library
//!
//! Shared code for the Premiações services including:
//! - Database models and repository patterns
//! - Error types and handling
//! - Configuration management
//! - Authentication and session utilities
//! - Object-storage client
//! - Metrics and observability

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod storage;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::Repository;
pub use errors::{AppError, Result};
pub use storage::StorageClient;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Role granted full access to the admin surface
pub const ADMIN_ROLE: &str = "admin";
