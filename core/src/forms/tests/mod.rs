mod bind_email_tests;

use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::repositories::MockUserRepository;
use crate::services::authentication::mock_password_hash;

/// A stored user whose password is `secret1`
pub(super) fn stored_user(username: &str, email: &str) -> User {
    User::new(
        username.to_string(),
        email.to_string(),
        mock_password_hash("secret1"),
    )
}

pub(super) fn repository_with(users: Vec<User>) -> Arc<MockUserRepository> {
    Arc::new(MockUserRepository::with_users(users))
}
