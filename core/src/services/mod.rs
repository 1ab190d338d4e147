//! Business services and the collaborator traits they depend on.

pub mod account;
pub mod authentication;
pub mod session;

pub use account::{AccountService, AccountServiceConfig, SignedIn};
pub use authentication::{mock_password_hash, AuthenticationService, MockAuthenticationService};
pub use session::{MockSessionStore, SessionStore};
