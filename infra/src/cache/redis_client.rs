//! Redis client with key prefixing and auto-reconnect

use redis::aio::ConnectionManager;
use tracing::{debug, info};

use ms_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Cloneable handle to a Redis server
///
/// Keys passed to every operation are namespaced with the configured
/// prefix. The underlying connection manager reconnects on its own.
#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
    config: CacheConfig,
}

impl RedisClient {
    /// Connect to the server described by `config`
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection = client.get_connection_manager().await?;

        info!(event = "redis_connected", prefix = ?config.key_prefix);
        Ok(Self { connection, config })
    }

    /// Full key for `key` under the configured prefix
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let value = redis::cmd("GET")
            .arg(self.key(key))
            .query_async::<_, Option<String>>(&mut conn)
            .await?;
        Ok(value)
    }

    /// Set `key` to `value`, expiring after `seconds`
    pub async fn set_with_expiry(&self, key: &str, value: &str, seconds: u64) -> Result<(), InfrastructureError> {
        let mut conn = self.connection.clone();
        redis::cmd("SET")
            .arg(self.key(key))
            .arg(value)
            .arg("EX")
            .arg(seconds)
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!(event = "redis_set", key, ttl_seconds = seconds);
        Ok(())
    }

    /// Delete `key`; returns whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let removed = redis::cmd("DEL")
            .arg(self.key(key))
            .query_async::<_, i64>(&mut conn)
            .await?;
        Ok(removed > 0)
    }

    pub async fn ping(&self) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let reply = redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(reply == "PONG")
    }
}
