//! Email binding form

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::CodePurpose;
use crate::errors::{DomainResult, FormError};
use crate::repositories::UserRepository;
use crate::services::session::SessionStore;

use super::{log_rejection, syntax_errors, verify_session_code, FormContext};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BindEmailForm {
    #[validate(email(code = "email_invalid", message = "Enter a valid email address"))]
    pub email: String,

    pub verification_code: String,
}

#[derive(Debug, Clone)]
pub struct ValidatedEmailBind {
    pub user: User,
    pub email: String,
}

impl BindEmailForm {
    pub fn new(email: impl Into<String>, verification_code: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            verification_code: verification_code.into(),
        }
    }

    /// Validate binding an email to the logged-in account
    ///
    /// Field errors are all collected. The form-level preconditions are
    /// checked in order and only the first one that fails is reported:
    /// logged in, no email bound yet, session code matches.
    pub async fn validate<U, S>(
        &self,
        ctx: &FormContext,
        users: &U,
        sessions: &S,
    ) -> DomainResult<ValidatedEmailBind>
    where
        U: UserRepository + ?Sized,
        S: SessionStore + ?Sized,
    {
        let form = Self::new(self.email.trim(), self.verification_code.trim());
        let mut errors = syntax_errors(&form);

        if !errors.has_field("email") && users.exists_by_email(&form.email).await? {
            errors.push(FormError::email_bound_elsewhere());
        }

        if form.verification_code.is_empty() {
            errors.push(FormError::code_blank());
        }

        let user = match &ctx.user {
            None => {
                errors.push(FormError::not_logged_in());
                None
            }
            Some(user) if user.has_bound_email() => {
                errors.push(FormError::email_already_bound());
                None
            }
            Some(user) => {
                let verified = verify_session_code(
                    sessions,
                    &ctx.session_id,
                    CodePurpose::BindEmail,
                    &form.verification_code,
                )
                .await?;
                if !verified {
                    errors.push(FormError::code_mismatch());
                }
                Some(user.clone())
            }
        };

        match user {
            Some(user) if errors.is_empty() => Ok(ValidatedEmailBind {
                user,
                email: form.email,
            }),
            _ => {
                log_rejection("bind_email", &errors);
                Err(errors.into())
            }
        }
    }
}
