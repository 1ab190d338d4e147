//! Account service: persists what the forms accept
//!
//! Handles login, registration, nickname changes, email binding and
//! verification code issuance on top of the user repository, the session
//! store and the authentication service.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::{AccountService, SignedIn};
