//! bcrypt-backed implementation of the authentication service

use async_trait::async_trait;
use std::sync::Arc;

use ms_core::domain::entities::user::User;
use ms_core::domain::value_objects::Credential;
use ms_core::errors::DomainError;
use ms_core::repositories::UserRepository;
use ms_core::services::authentication::AuthenticationService;

use crate::InfrastructureError;

/// Verifies credentials against bcrypt hashes stored in the user repository
///
/// Hashing runs on the blocking thread pool so it does not stall the
/// async executor.
pub struct BcryptAuthenticationService<R: UserRepository> {
    users: Arc<R>,
    cost: u32,
}

impl<R: UserRepository> BcryptAuthenticationService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self::with_cost(users, bcrypt::DEFAULT_COST)
    }

    /// Use a specific work factor; low costs are only for tests
    pub fn with_cost(users: Arc<R>, cost: u32) -> Self {
        Self { users, cost }
    }
}

async fn blocking<T, F>(task: F) -> Result<T, DomainError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Hashing task failed: {}", e),
        })?
        .map_err(|e| InfrastructureError::from(e).into())
}

#[async_trait]
impl<R: UserRepository> AuthenticationService for BcryptAuthenticationService<R> {
    async fn authenticate(&self, credential: &Credential) -> Result<Option<User>, DomainError> {
        let Some(user) = self.users.find_by_username(&credential.username).await? else {
            return Ok(None);
        };
        if !user.is_active {
            return Ok(None);
        }

        let password = credential.password.clone();
        let hash = user.password_hash.clone();
        let verified = match blocking(move || bcrypt::verify(password, &hash)).await {
            Ok(verified) => verified,
            Err(e) => {
                // A malformed stored hash rejects the login rather than failing the request
                tracing::warn!(event = "password_hash_unreadable", user_id = %user.id, error = %e);
                false
            }
        };

        Ok(verified.then_some(user))
    }

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;
        blocking(move || bcrypt::hash(password, cost)).await
    }
}
