//! Liveness checks for the backing services

use async_trait::async_trait;

/// A backing service the health endpoint reports on
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Component name used in the health report
    fn name(&self) -> &'static str;

    /// Whether the component answered; failures are logged, not returned
    async fn is_healthy(&self) -> bool;
}

#[cfg(feature = "mysql")]
#[async_trait]
impl HealthCheck for crate::database::DatabasePool {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn is_healthy(&self) -> bool {
        match self.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!(event = "health_check_failed", component = "database", error = %e);
                false
            }
        }
    }
}

#[cfg(feature = "redis-cache")]
#[async_trait]
impl HealthCheck for crate::cache::RedisClient {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn is_healthy(&self) -> bool {
        match self.ping().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!(event = "health_check_failed", component = "redis", error = %e);
                false
            }
        }
    }
}
