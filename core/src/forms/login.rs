//! Login form

use serde::Deserialize;
use std::fmt;
use validator::Validate;

use crate::domain::entities::user::User;
use crate::domain::value_objects::Credential;
use crate::errors::{DomainResult, FormError};
use crate::services::authentication::AuthenticationService;

use super::{log_rejection, syntax_errors};

#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(length(min = 1, code = "username_required", message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, code = "password_required", message = "Password is required"))]
    pub password: String,
}

/// A login whose credential the authentication service accepted
#[derive(Debug, Clone)]
pub struct ValidatedLogin {
    pub user: User,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Verify the submitted credential
    ///
    /// The authentication service is only consulted once both fields are
    /// present. A rejected credential produces a single form-scoped
    /// `invalid_credentials` error that does not reveal which half was wrong.
    pub async fn validate<A>(&self, auth: &A) -> DomainResult<ValidatedLogin>
    where
        A: AuthenticationService + ?Sized,
    {
        let form = Self::new(self.username.trim(), self.password.trim());

        let errors = syntax_errors(&form);
        if !errors.is_empty() {
            log_rejection("login", &errors);
            return Err(errors.into());
        }

        let credential = Credential::new(form.username, form.password);
        match auth.authenticate(&credential).await? {
            Some(user) => Ok(ValidatedLogin { user }),
            None => {
                tracing::info!(event = "login_rejected", username = %credential.username);
                Err(FormError::invalid_credentials().into())
            }
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
