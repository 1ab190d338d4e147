//! Registration form

use serde::Deserialize;
use std::fmt;
use validator::Validate;

use crate::domain::entities::verification_code::CodePurpose;
use crate::errors::{DomainResult, FormError};
use crate::repositories::UserRepository;
use crate::services::session::SessionStore;

use super::{log_rejection, syntax_errors, verify_session_code, FormContext};

#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationForm {
    #[validate(length(
        min = 4,
        max = 30,
        code = "username_length",
        message = "Username must be between 4 and 30 characters"
    ))]
    pub username: String,

    #[validate(length(min = 6, code = "password_length", message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 6, code = "password_length", message = "Password must be at least 6 characters"))]
    pub password_again: String,

    #[validate(email(code = "email_invalid", message = "Enter a valid email address"))]
    pub email: String,

    /// Left blank while the user requests a code, so it has no field rule
    pub verification_code: String,
}

/// A registration ready to be persisted
#[derive(Clone)]
pub struct ValidatedRegistration {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl RegistrationForm {
    fn normalized(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            password: self.password.trim().to_string(),
            password_again: self.password_again.trim().to_string(),
            email: self.email.trim().to_string(),
            verification_code: self.verification_code.trim().to_string(),
        }
    }

    /// Validate a sign-up submission
    ///
    /// Every failure is collected. A field whose rule failed skips its store
    /// lookup, and the password confirmation is only compared when both
    /// passwords passed their rules. The session code is always checked.
    pub async fn validate<U, S>(
        &self,
        ctx: &FormContext,
        users: &U,
        sessions: &S,
    ) -> DomainResult<ValidatedRegistration>
    where
        U: UserRepository + ?Sized,
        S: SessionStore + ?Sized,
    {
        let form = self.normalized();
        let mut errors = syntax_errors(&form);

        if !errors.has_field("username") && users.exists_by_username(&form.username).await? {
            errors.push(FormError::username_taken());
        }

        if !errors.has_field("email") && users.exists_by_email(&form.email).await? {
            errors.push(FormError::email_taken());
        }

        if !errors.has_field("password")
            && !errors.has_field("password_again")
            && form.password != form.password_again
        {
            errors.push(FormError::password_mismatch());
        }

        if !verify_session_code(sessions, &ctx.session_id, CodePurpose::Register, &form.verification_code).await? {
            errors.push(FormError::code_mismatch());
        }

        if !errors.is_empty() {
            log_rejection("register", &errors);
        }

        errors
            .into_result(|| ValidatedRegistration {
                username: form.username,
                password: form.password,
                email: form.email,
            })
            .map_err(Into::into)
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("password", &"***")
            .field("password_again", &"***")
            .field("email", &self.email)
            .field("verification_code", &"***")
            .finish()
    }
}

impl fmt::Debug for ValidatedRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedRegistration")
            .field("username", &self.username)
            .field("password", &"***")
            .field("email", &self.email)
            .finish()
    }
}
