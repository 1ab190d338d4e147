//! Reversible stand-in for the real password hasher

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::domain::value_objects::Credential;
use crate::errors::DomainError;
use crate::repositories::UserRepository;

use super::traits::AuthenticationService;

const MOCK_HASH_PREFIX: &str = "mock$";

/// Authentication over a user repository with a trivially reversible "hash"
pub struct MockAuthenticationService<R: UserRepository> {
    users: Arc<R>,
}

impl<R: UserRepository> MockAuthenticationService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

}

/// The hash `MockAuthenticationService` stores for `password`
pub fn mock_password_hash(password: &str) -> String {
    format!("{}{}", MOCK_HASH_PREFIX, password)
}

#[async_trait]
impl<R: UserRepository> AuthenticationService for MockAuthenticationService<R> {
    async fn authenticate(&self, credential: &Credential) -> Result<Option<User>, DomainError> {
        let user = self.users.find_by_username(&credential.username).await?;
        Ok(user.filter(|u| u.is_active && u.password_hash == mock_password_hash(&credential.password)))
    }

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        Ok(mock_password_hash(password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;

    fn credential(username: &str, password: &str) -> Credential {
        Credential::new(username.to_string(), password.to_string())
    }

    #[tokio::test]
    async fn test_authenticate() {
        let mut inactive = User::new(
            "bob".to_string(),
            String::new(),
            mock_password_hash("secret1"),
        );
        inactive.is_active = false;
        let repo = Arc::new(MockUserRepository::with_users(vec![
            User::new(
                "alice".to_string(),
                String::new(),
                mock_password_hash("secret1"),
            ),
            inactive,
        ]));
        let auth = MockAuthenticationService::new(repo);

        let user = auth.authenticate(&credential("alice", "secret1")).await.unwrap();
        assert_eq!(user.map(|u| u.username), Some("alice".to_string()));

        assert!(auth.authenticate(&credential("alice", "wrong")).await.unwrap().is_none());
        assert!(auth.authenticate(&credential("nobody", "secret1")).await.unwrap().is_none());
        assert!(auth.authenticate(&credential("bob", "secret1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_hash_password_is_not_plaintext() {
        let auth = MockAuthenticationService::new(Arc::new(MockUserRepository::new()));
        let hash = auth.hash_password("secret1").await.unwrap();
        assert_ne!(hash, "secret1");
        assert!(hash.ends_with("secret1"));
    }
}
