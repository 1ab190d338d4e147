//! Shared utilities and common types for the MySite server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures and error codes
//! - Language preference for localized messages

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, CacheConfig, SessionConfig,
    ServerConfig, LoggingConfig
};
pub use errors::{ErrorResponse, IntoErrorResponse, error_codes};
pub use types::Language;
