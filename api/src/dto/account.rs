use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ms_core::domain::entities::user::User;

/// Request body for POST /api/v1/user/send-code
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SendCodeRequest {
    pub email: String,
    /// `register` or `bind_email`
    pub purpose: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendCodeResponse {
    pub message: String,
    /// Seconds until the code expires
    pub expires_in: u64,
    /// Only exposed outside production, where no mailer delivers the code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Public view of an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub nickname: Option<String>,
    pub display_name: String,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            display_name: user.display_name().to_string(),
            last_login_at: user.last_login_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for GET /api/v1/user/me
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}
