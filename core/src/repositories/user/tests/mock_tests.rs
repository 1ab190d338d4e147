//! Unit tests for mock user repository

use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(username: &str, email: &str) -> User {
    User::new(username.to_string(), email.to_string(), "hash".to_string())
}

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();
    let alice = user("alice", "alice@example.com");

    let created = repo.create(alice.clone()).await.unwrap();
    assert_eq!(created.id, alice.id);

    let found = repo.find_by_id(alice.id).await.unwrap();
    assert_eq!(found.unwrap().username, "alice");

    let by_name = repo.find_by_username("alice").await.unwrap();
    assert_eq!(by_name.unwrap().id, alice.id);
}

#[tokio::test]
async fn test_mock_repository_existence_checks() {
    let repo = MockUserRepository::with_users(vec![user("alice", "alice@example.com"), user("bob", "")]);

    assert!(repo.exists_by_username("alice").await.unwrap());
    assert!(!repo.exists_by_username("carol").await.unwrap());
    assert!(repo.exists_by_email("alice@example.com").await.unwrap());
    assert!(!repo.exists_by_email("bob@example.com").await.unwrap());
    // An unbound email is never a conflict
    assert!(!repo.exists_by_email("").await.unwrap());
}

#[tokio::test]
async fn test_mock_repository_duplicate_username() {
    let repo = MockUserRepository::new();
    repo.create(user("alice", "")).await.unwrap();

    let result = repo.create(user("alice", "other@example.com")).await;
    assert!(matches!(result, Err(DomainError::Database(_))));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_mock_repository_update_missing_user() {
    let repo = MockUserRepository::new();
    let result = repo.update(user("ghost", "")).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
