//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the MySite account forms
//! depend on:
//! - **Database**: MySQL user repository using SQLx
//! - **Cache**: Redis-backed session store for login state and issued codes
//! - **Services**: bcrypt-based authentication service
//! - **Health**: liveness checks over the database and Redis
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis session support (default)

use ms_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and session storage
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Services module - Infrastructure service implementations
pub mod services;

pub mod health;

pub use health::HealthCheck;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Password hashing error
    #[error("Hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Stored data could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Database(e) => DomainError::Database(e.to_string()),
            InfrastructureError::Cache(e) => DomainError::Session(e.to_string()),
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_maps_to_internal() {
        let err: DomainError = InfrastructureError::Config("missing REDIS_URL".to_string()).into();
        assert!(matches!(err, DomainError::Internal { .. }));
        assert!(err.to_string().contains("missing REDIS_URL"));
    }

    #[test]
    fn test_database_error_maps_to_database() {
        let err: DomainError = InfrastructureError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, DomainError::Database(_)));
    }
}
