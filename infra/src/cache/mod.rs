//! Cache module for Redis-backed state
//!
//! Provides a thin Redis client and the session store built on it.

pub mod redis_client;
pub mod session_store;


pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;

// Re-export commonly used types
pub use ms_shared::config::CacheConfig;
