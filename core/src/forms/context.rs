//! Request context handed to the validators

use crate::domain::entities::user::User;

/// Who is submitting, and from which session
#[derive(Debug, Clone)]
pub struct FormContext {
    pub session_id: String,

    /// The logged-in user, `None` for anonymous requests
    pub user: Option<User>,
}

impl FormContext {
    pub fn anonymous(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user: None,
        }
    }

    pub fn authenticated(session_id: impl Into<String>, user: User) -> Self {
        Self {
            session_id: session_id.into(),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
