//! MySQL implementation of the UserRepository trait.
//!
//! Users live in the `users` table. An unbound email is stored as the empty
//! string, so email lookups ignore empty values.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ms_core::domain::entities::user::User;
use ms_core::errors::{DomainError, FormError};
use ms_core::repositories::UserRepository;

const USERNAME_KEY: &str = "uk_users_username";

const USER_COLUMNS: &str =
    "id, username, email, nickname, password_hash, is_active, created_at, updated_at, last_login_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row into a User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            username: row.try_get("username").map_err(column_error("username"))?,
            email: row.try_get("email").map_err(column_error("email"))?,
            nickname: row.try_get("nickname").map_err(column_error("nickname"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(column_error("password_hash"))?,
            is_active: row.try_get("is_active").map_err(column_error("is_active"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(column_error("last_login_at"))?,
        })
    }

    async fn find_one(&self, filter: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, filter);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find user"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn exists(&self, filter: &str, value: &str) -> Result<bool, DomainError> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM users WHERE {} = ?) AS found", filter);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error("check user existence"))?;

        let found: i64 = row.try_get("found").map_err(column_error("found"))?;
        Ok(found == 1)
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn query_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Database(format!("Failed to {}: {}", action, e))
}

/// Form error for a duplicate-key message, when the key is one a form reports.
///
/// The existence checks in the registration form can race with a concurrent
/// insert, so the unique key is the final word on a taken username.
pub(crate) fn duplicate_key_error(message: &str) -> Option<FormError> {
    if message.contains(USERNAME_KEY) {
        Some(FormError::username_taken())
    } else if message.contains("email") {
        Some(FormError::email_taken())
    } else {
        None
    }
}

fn insert_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            if let Some(form_error) = duplicate_key_error(db.message()) {
                tracing::info!(event = "user_insert_conflict", code = %form_error.code);
                return form_error.into();
            }
        }
    }
    query_error("create user")(e)
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("username", username.to_string()).await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        self.exists("username", username).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        if email.is_empty() {
            return Ok(false);
        }
        self.exists("email", email).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, username, email, nickname, password_hash, is_active,
                created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.nickname)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(insert_error)?;

        tracing::debug!(event = "user_inserted", user_id = %user.id);
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, nickname = ?, password_hash = ?, is_active = ?,
                updated_at = ?, last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.nickname)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error("update user"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            });
        }
        Ok(user)
    }
}
