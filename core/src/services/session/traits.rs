//! Trait for session store integration

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::DomainError;

/// Session state keyed by session identifier
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The unexpired code issued to this session for `purpose`, if any
    async fn get_code(&self, session_id: &str, purpose: CodePurpose) -> Result<Option<VerificationCode>, DomainError>;

    /// Store a code, replacing any previous code for the same purpose
    ///
    /// Also used to write back a code whose attempt counter changed; the
    /// stored copy keeps the code's own expiry.
    async fn store_code(&self, session_id: &str, code: &VerificationCode) -> Result<(), DomainError>;

    /// Forget the code issued for `purpose`
    async fn clear_code(&self, session_id: &str, purpose: CodePurpose) -> Result<(), DomainError>;

    /// The user logged in on this session
    async fn get_user_id(&self, session_id: &str) -> Result<Option<Uuid>, DomainError>;

    /// Log `user_id` in on this session
    async fn set_user_id(&self, session_id: &str, user_id: Uuid) -> Result<(), DomainError>;

    /// Log the session out
    async fn clear_user_id(&self, session_id: &str) -> Result<(), DomainError>;
}
