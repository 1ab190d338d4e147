//! Trait for authentication service integration

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::domain::value_objects::Credential;
use crate::errors::DomainError;

/// External authentication backend
#[async_trait]
pub trait AuthenticationService: Send + Sync {
    /// Resolve a credential to an active user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Username exists, password verifies and the account is active
    /// * `Ok(None)` - Credential rejected
    /// * `Err(DomainError)` - Backend failure
    async fn authenticate(&self, credential: &Credential) -> Result<Option<User>, DomainError>;

    /// Produce the stored form of a plaintext password
    async fn hash_password(&self, password: &str) -> Result<String, DomainError>;
}
