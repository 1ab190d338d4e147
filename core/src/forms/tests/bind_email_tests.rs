//! Tests for the email binding form

use crate::domain::entities::verification_code::{CodePurpose, MAX_ATTEMPTS};
use crate::services::session::SessionStore;
use crate::errors::{codes, FormErrorKind, FormErrors};
use crate::forms::{BindEmailForm, FormContext};
use crate::services::session::MockSessionStore;

use super::{repository_with, stored_user};

const SESSION: &str = "session-1";

async fn sessions_with_code(code: &str) -> MockSessionStore {
    let sessions = MockSessionStore::new();
    sessions.insert_code(SESSION, CodePurpose::BindEmail, code).await;
    sessions
}

async fn reject(form: BindEmailForm, ctx: &FormContext, sessions: &MockSessionStore) -> FormErrors {
    let users = repository_with(vec![stored_user("taken", "taken@example.com")]);
    let err = form.validate(ctx, users.as_ref(), sessions).await.unwrap_err();
    err.form_errors().cloned().expect("form rejection")
}

fn unbound_ctx() -> FormContext {
    FormContext::authenticated(SESSION, stored_user("alice", ""))
}

#[tokio::test]
async fn test_valid_binding() {
    let users = repository_with(vec![]);
    let sessions = sessions_with_code("123456").await;

    let validated = BindEmailForm::new(" alice@example.com ", " 123456 ")
        .validate(&unbound_ctx(), users.as_ref(), &sessions)
        .await
        .unwrap();

    assert_eq!(validated.email, "alice@example.com");
    assert_eq!(validated.user.username, "alice");
}

#[tokio::test]
async fn test_already_bound_is_state_conflict_even_when_valid() {
    let sessions = sessions_with_code("123456").await;
    let ctx = FormContext::authenticated(SESSION, stored_user("alice", "old@example.com"));

    let errors = reject(BindEmailForm::new("alice@example.com", "123456"), &ctx, &sessions).await;
    assert_eq!(errors.len(), 1);
    assert!(errors.has_kind(FormErrorKind::StateConflict));
    assert!(errors.has_code(codes::EMAIL_ALREADY_BOUND));
}

#[tokio::test]
async fn test_not_logged_in_short_circuits_form_checks() {
    let sessions = MockSessionStore::new();
    let ctx = FormContext::anonymous(SESSION);

    let errors = reject(BindEmailForm::new("alice@example.com", "999999"), &ctx, &sessions).await;
    assert_eq!(errors.len(), 1);
    assert!(errors.has_kind(FormErrorKind::AuthenticationRequired));
    assert!(!errors.has_code(codes::CODE_MISMATCH));
}

#[tokio::test]
async fn test_wrong_code_is_mismatch() {
    let sessions = sessions_with_code("123456").await;

    let errors = reject(BindEmailForm::new("alice@example.com", "111111"), &unbound_ctx(), &sessions).await;
    assert_eq!(errors.len(), 1);
    assert!(errors.has_kind(FormErrorKind::Mismatch));
    assert!(errors.has_code(codes::CODE_MISMATCH));
}

#[tokio::test]
async fn test_blank_code_is_field_and_form_error() {
    let sessions = sessions_with_code("123456").await;

    let errors = reject(BindEmailForm::new("alice@example.com", "   "), &unbound_ctx(), &sessions).await;
    assert!(errors.has_field("verification_code"));
    assert!(errors.has_code(codes::CODE_BLANK));
    assert!(errors.has_code(codes::CODE_MISMATCH));
}

#[tokio::test]
async fn test_no_issued_code_rejects_any_submission() {
    let sessions = MockSessionStore::new();

    let errors = reject(BindEmailForm::new("alice@example.com", "123456"), &unbound_ctx(), &sessions).await;
    assert!(errors.has_code(codes::CODE_MISMATCH));
}

#[tokio::test]
async fn test_email_of_another_user_is_rejected() {
    let sessions = sessions_with_code("123456").await;

    let errors = reject(BindEmailForm::new("taken@example.com", "123456"), &unbound_ctx(), &sessions).await;
    assert!(errors.has_field("email"));
    assert!(errors.has_code(codes::EMAIL_BOUND_ELSEWHERE));
}

#[tokio::test]
async fn test_invalid_email_syntax_skips_lookup() {
    let sessions = sessions_with_code("123456").await;

    let errors = reject(BindEmailForm::new("nope", "123456"), &unbound_ctx(), &sessions).await;
    assert!(errors.has_code(codes::EMAIL_INVALID));
    assert!(!errors.has_code(codes::EMAIL_BOUND_ELSEWHERE));
}

#[tokio::test]
async fn test_guessing_the_code_is_cut_off() {
    let sessions = sessions_with_code("656118").await;
    let ctx = unbound_ctx();

    for guess in 0..MAX_ATTEMPTS {
        let errors = reject(
            BindEmailForm::new("alice@example.com", format!("{:06}", guess)),
            &ctx,
            &sessions,
        )
        .await;
        assert!(errors.has_code(codes::CODE_MISMATCH));
    }

    // The right code no longer works once the guesses are used up
    let errors = reject(BindEmailForm::new("alice@example.com", "656118"), &ctx, &sessions).await;
    assert!(errors.has_code(codes::CODE_MISMATCH));
    assert!(sessions.get_code(SESSION, CodePurpose::BindEmail).await.unwrap().is_none());
}

#[tokio::test]
async fn test_blank_code_is_not_counted_as_a_guess() {
    let sessions = sessions_with_code("123456").await;

    let errors = reject(BindEmailForm::new("alice@example.com", "  "), &unbound_ctx(), &sessions).await;
    assert!(errors.has_code(codes::CODE_BLANK));

    let stored = sessions.get_code(SESSION, CodePurpose::BindEmail).await.unwrap().unwrap();
    assert_eq!(stored.attempts, 0);
}
