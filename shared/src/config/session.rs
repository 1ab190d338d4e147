//! Session and verification-code configuration

use serde::{Deserialize, Serialize};

/// Default lifetime of an issued verification code
pub const DEFAULT_CODE_TTL_SECONDS: u64 = 30 * 60;

/// Session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session identifier
    pub cookie_name: String,

    /// Whether the session cookie is restricted to HTTPS
    pub secure: bool,

    /// Lifetime of session-scoped data in seconds
    pub timeout: u64,

    /// Lifetime of an issued verification code in seconds
    pub code_ttl: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from("sessionid"),
            secure: false,
            timeout: 14 * 24 * 3600,
            code_ttl: DEFAULT_CODE_TTL_SECONDS,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cookie_name: std::env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.secure),
            timeout: std::env::var("SESSION_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            code_ttl: std::env::var("VERIFICATION_CODE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_ttl),
        }
    }
}
