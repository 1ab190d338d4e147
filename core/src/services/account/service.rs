//! Main account service implementation

use std::sync::Arc;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::{DomainResult, FormError};
use crate::forms::{BindEmailForm, ChangeNicknameForm, FormContext, LoginForm, RegistrationForm};
use crate::repositories::UserRepository;
use crate::services::authentication::AuthenticationService;
use crate::services::session::SessionStore;

use super::config::AccountServiceConfig;

/// A user that was just logged in, and the session id now carrying the login
///
/// The id differs from the one the request arrived with; the caller must
/// hand it back to the client.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub session_id: String,
}

/// Account flows for one site
pub struct AccountService<U, S, A>
where
    U: UserRepository,
    S: SessionStore,
    A: AuthenticationService,
{
    /// User repository for database operations
    users: Arc<U>,
    /// Session state (logged-in user, issued codes)
    sessions: Arc<S>,
    /// Credential checks and password hashing
    auth: Arc<A>,
    config: AccountServiceConfig,
}

impl<U, S, A> AccountService<U, S, A>
where
    U: UserRepository,
    S: SessionStore,
    A: AuthenticationService,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>, auth: Arc<A>, config: AccountServiceConfig) -> Self {
        Self {
            users,
            sessions,
            auth,
            config,
        }
    }

    /// Resolve the user logged in on `session_id`
    ///
    /// A session pointing at a deleted or deactivated account is logged out
    /// and treated as anonymous.
    pub async fn current_user(&self, session_id: &str) -> DomainResult<Option<User>> {
        let Some(user_id) = self.sessions.get_user_id(session_id).await? else {
            return Ok(None);
        };

        match self.users.find_by_id(user_id).await? {
            Some(user) if user.is_active => Ok(Some(user)),
            _ => {
                tracing::warn!(event = "stale_session", %user_id);
                self.sessions.clear_user_id(session_id).await?;
                Ok(None)
            }
        }
    }

    /// Build the validation context for a request on `session_id`
    pub async fn context(&self, session_id: &str) -> DomainResult<FormContext> {
        let user = self.current_user(session_id).await?;
        Ok(FormContext {
            session_id: session_id.to_string(),
            user,
        })
    }

    /// Issue a verification code for `purpose` and store it in the session
    ///
    /// The code is returned so the caller can deliver it to `email`. Issuing
    /// a bind code requires a logged-in user. A new code replaces any earlier
    /// one for the same purpose.
    pub async fn issue_code(
        &self,
        ctx: &FormContext,
        purpose: CodePurpose,
        email: &str,
    ) -> DomainResult<VerificationCode> {
        let email = email.trim();

        if purpose == CodePurpose::BindEmail && !ctx.is_authenticated() {
            return Err(FormError::not_logged_in().into());
        }
        if !email.validate_email() {
            return Err(FormError::email_invalid().into());
        }

        let code = VerificationCode::issue(purpose, email.to_string(), self.config.code_ttl_seconds);
        self.sessions.store_code(&ctx.session_id, &code).await?;

        tracing::info!(
            event = "verification_code_issued",
            purpose = purpose.session_key(),
            ttl_seconds = self.config.code_ttl_seconds,
        );
        Ok(code)
    }

    /// Move the session to a fresh id and log `user_id` in on it
    ///
    /// Pending codes follow the session; the old id is left anonymous and
    /// empty, so an id known before login is worthless afterwards.
    async fn cycle_session(&self, old_id: &str, user_id: Uuid) -> DomainResult<String> {
        let new_id = Uuid::new_v4().simple().to_string();

        for purpose in CodePurpose::ALL {
            if let Some(code) = self.sessions.get_code(old_id, purpose).await? {
                self.sessions.store_code(&new_id, &code).await?;
                self.sessions.clear_code(old_id, purpose).await?;
            }
        }
        self.sessions.clear_user_id(old_id).await?;
        self.sessions.set_user_id(&new_id, user_id).await?;

        Ok(new_id)
    }

    /// Log a user in, moving the session to a new id
    pub async fn login(&self, ctx: &FormContext, form: &LoginForm) -> DomainResult<SignedIn> {
        let validated = form.validate(self.auth.as_ref()).await?;

        let mut user = validated.user;
        user.update_last_login();
        let user = self.users.update(user).await?;
        let session_id = self.cycle_session(&ctx.session_id, user.id).await?;

        tracing::info!(event = "login", user_id = %user.id);
        Ok(SignedIn { user, session_id })
    }

    /// Create an account and log it in on a new session id
    pub async fn register(&self, ctx: &FormContext, form: &RegistrationForm) -> DomainResult<SignedIn> {
        let validated = form
            .validate(ctx, self.users.as_ref(), self.sessions.as_ref())
            .await?;

        let password_hash = self.auth.hash_password(&validated.password).await?;
        let mut user = User::new(validated.username, validated.email, password_hash);
        user.update_last_login();
        let user = self.users.create(user).await?;

        self.sessions
            .clear_code(&ctx.session_id, CodePurpose::Register)
            .await?;
        let session_id = self.cycle_session(&ctx.session_id, user.id).await?;

        tracing::info!(event = "user_registered", user_id = %user.id);
        Ok(SignedIn { user, session_id })
    }

    pub async fn change_nickname(&self, ctx: &FormContext, form: &ChangeNicknameForm) -> DomainResult<User> {
        let validated = form.validate(ctx)?;

        let mut user = validated.user;
        user.change_nickname(validated.nickname);
        let user = self.users.update(user).await?;

        tracing::info!(event = "nickname_changed", user_id = %user.id);
        Ok(user)
    }

    /// Bind an email to the logged-in account and consume the bind code
    pub async fn bind_email(&self, ctx: &FormContext, form: &BindEmailForm) -> DomainResult<User> {
        let validated = form
            .validate(ctx, self.users.as_ref(), self.sessions.as_ref())
            .await?;

        let mut user = validated.user;
        user.bind_email(validated.email);
        let user = self.users.update(user).await?;

        self.sessions
            .clear_code(&ctx.session_id, CodePurpose::BindEmail)
            .await?;

        tracing::info!(event = "email_bound", user_id = %user.id);
        Ok(user)
    }

    pub async fn logout(&self, ctx: &FormContext) -> DomainResult<()> {
        self.sessions.clear_user_id(&ctx.session_id).await?;
        if let Some(user) = &ctx.user {
            tracing::info!(event = "logout", user_id = %user.id);
        }
        Ok(())
    }

}
