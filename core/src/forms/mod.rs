//! The four account forms
//!
//! Each form is a typed record whose syntactic rules are declared with
//! `validator` attributes. `validate` first normalizes the submission, runs
//! those rules, then performs the semantic checks that need the user store,
//! the session or the logged-in user. It yields either a validated record or
//! every error it found.

mod bind_email;
mod change_nickname;
mod context;
mod login;
mod register;

#[cfg(test)]
mod tests;

pub use bind_email::{BindEmailForm, ValidatedEmailBind};
pub use change_nickname::{ChangeNicknameForm, ValidatedNicknameChange, NICKNAME_MAX_LENGTH};
pub use context::FormContext;
pub use login::{LoginForm, ValidatedLogin};
pub use register::{RegistrationForm, ValidatedRegistration};

use validator::Validate;

use crate::domain::entities::verification_code::CodePurpose;
use crate::errors::{DomainResult, FormErrors};
use crate::services::session::SessionStore;

/// Run the declarative field rules of `form`
fn syntax_errors<T: Validate>(form: &T) -> FormErrors {
    match form.validate() {
        Ok(()) => FormErrors::new(),
        Err(errors) => errors.into(),
    }
}

/// Session code check shared by registration and email binding
///
/// A session without a code never matches. A wrong non-blank submission is
/// recorded against the stored code, which is discarded once its attempts
/// run out.
async fn verify_session_code<S>(
    sessions: &S,
    session_id: &str,
    purpose: CodePurpose,
    supplied: &str,
) -> DomainResult<bool>
where
    S: SessionStore + ?Sized,
{
    if supplied.is_empty() {
        return Ok(false);
    }
    let Some(mut code) = sessions.get_code(session_id, purpose).await? else {
        return Ok(false);
    };

    if code.verify(supplied) {
        return Ok(true);
    }

    if code.attempts_exhausted() {
        tracing::warn!(event = "verification_code_exhausted", purpose = purpose.session_key());
        sessions.clear_code(session_id, purpose).await?;
    } else {
        sessions.store_code(session_id, &code).await?;
    }
    Ok(false)
}

/// Log a rejected submission without its contents
fn log_rejection(form: &'static str, errors: &FormErrors) {
    let codes: Vec<&str> = errors.errors().iter().map(|e| e.code.as_str()).collect();
    tracing::debug!(event = "form_rejected", form, errors = ?codes);
}
