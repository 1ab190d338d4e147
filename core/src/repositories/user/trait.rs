//! User repository trait defining the interface for user data persistence.
//!
//! The forms only ever read through this trait (uniqueness lookups); writes
//! are issued by the account service once a submission has been validated.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use ms_core::repositories::UserRepository;
/// use ms_core::domain::entities::user::User;
/// use ms_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, _: Uuid) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn exists_by_username(&self, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn exists_by_email(&self, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn update(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Check if any user already uses the given username
    ///
    /// # Example
    /// ```no_run
    /// # use ms_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// if repo.exists_by_username("alice").await? {
    ///     println!("Username already taken");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;

    /// Check if any user already has the given email bound
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g., duplicate username)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::NotFound)` - No user with that ID
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
