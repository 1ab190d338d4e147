//! Redis-backed session store
//!
//! Key layout, below the client prefix:
//! - `session:{id}:user` holds the logged-in user id and expires with the session
//! - `session:{id}:{purpose key}` holds a JSON-encoded verification code and expires with it

use async_trait::async_trait;
use uuid::Uuid;

use ms_core::domain::entities::verification_code::{CodePurpose, VerificationCode};
use ms_core::errors::DomainError;
use ms_core::services::session::SessionStore;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Session state kept in Redis
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
    /// Lifetime of a login, restarted whenever it is set
    session_ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient, session_ttl_seconds: u64) -> Self {
        Self {
            client,
            session_ttl_seconds,
        }
    }

    pub(crate) fn user_key(session_id: &str) -> String {
        format!("session:{}:user", session_id)
    }

    pub(crate) fn code_key(session_id: &str, purpose: CodePurpose) -> String {
        format!("session:{}:{}", session_id, purpose.session_key())
    }

    pub(crate) fn decode_code(raw: &str) -> Result<VerificationCode, InfrastructureError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get_code(&self, session_id: &str, purpose: CodePurpose) -> Result<Option<VerificationCode>, DomainError> {
        let Some(raw) = self.client.get(&Self::code_key(session_id, purpose)).await? else {
            return Ok(None);
        };

        let code = Self::decode_code(&raw)?;
        Ok((!code.is_expired()).then_some(code))
    }

    async fn store_code(&self, session_id: &str, code: &VerificationCode) -> Result<(), DomainError> {
        let key = Self::code_key(session_id, code.purpose);
        let ttl = code.remaining_ttl_seconds();
        if ttl == 0 {
            self.client.delete(&key).await?;
            return Ok(());
        }

        let raw = serde_json::to_string(code).map_err(InfrastructureError::from)?;
        self.client.set_with_expiry(&key, &raw, ttl).await?;
        Ok(())
    }

    async fn clear_code(&self, session_id: &str, purpose: CodePurpose) -> Result<(), DomainError> {
        self.client.delete(&Self::code_key(session_id, purpose)).await?;
        Ok(())
    }

    async fn get_user_id(&self, session_id: &str) -> Result<Option<Uuid>, DomainError> {
        let Some(raw) = self.client.get(&Self::user_key(session_id)).await? else {
            return Ok(None);
        };

        match Uuid::parse_str(&raw) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                tracing::warn!(event = "corrupt_session_user", error = %e);
                Ok(None)
            }
        }
    }

    async fn set_user_id(&self, session_id: &str, user_id: Uuid) -> Result<(), DomainError> {
        self.client
            .set_with_expiry(
                &Self::user_key(session_id),
                &user_id.to_string(),
                self.session_ttl_seconds,
            )
            .await?;
        Ok(())
    }

    async fn clear_user_id(&self, session_id: &str) -> Result<(), DomainError> {
        self.client.delete(&Self::user_key(session_id)).await?;
        Ok(())
    }
}
