//! Account route handlers
//!
//! One endpoint per form plus session management:
//! - Login, registration and logout
//! - Nickname change and email binding
//! - Verification code issuance
//! - Current user lookup

pub mod bind_email;
pub mod change_nickname;
pub mod login;
pub mod logout;
pub mod me;
pub mod register;
pub mod send_code;

use std::sync::Arc;

use ms_core::repositories::UserRepository;
use ms_core::services::{AccountService, AuthenticationService, SessionStore};
use ms_infra::HealthCheck;
use ms_shared::Environment;

/// Application state that holds shared services
pub struct AppState<U, S, A>
where
    U: UserRepository,
    S: SessionStore,
    A: AuthenticationService,
{
    pub account_service: Arc<AccountService<U, S, A>>,
    pub environment: Environment,
    /// Backing services reported by `/health`
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl<U, S, A> AppState<U, S, A>
where
    U: UserRepository,
    S: SessionStore,
    A: AuthenticationService,
{
    pub fn new(account_service: Arc<AccountService<U, S, A>>, environment: Environment) -> Self {
        Self {
            account_service,
            environment,
            health_checks: Vec::new(),
        }
    }

    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
