//! User entity representing a registered account on the site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name, unique across the store
    pub username: String,

    /// Bound email address; empty when none is bound
    pub email: String,

    /// Display nickname chosen by the user
    pub nickname: Option<String>,

    /// Password hash produced by the authentication service
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the account may log in
    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new active User instance
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            nickname: None,
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Whether an email address is bound to this account
    pub fn has_bound_email(&self) -> bool {
        !self.email.is_empty()
    }

    /// Binds an email address to the account
    pub fn bind_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Replaces the nickname
    pub fn change_nickname(&mut self, nickname: String) {
        self.nickname = Some(nickname);
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Nickname when set, username otherwise
    pub fn display_name(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nickname) if !nickname.is_empty() => nickname,
            _ => &self.username,
        }
    }
}
