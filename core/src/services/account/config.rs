//! Configuration for the account service

use crate::domain::entities::verification_code::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Seconds an issued verification code stays valid
    pub code_ttl_seconds: i64,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_EXPIRATION_MINUTES * 60,
        }
    }
}
