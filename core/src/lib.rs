//! # MySite Core
//!
//! Domain layer for the MySite account backend: user entities, the login,
//! registration, nickname and email-binding forms, the collaborator traits
//! they validate against, and the account service that persists accepted
//! submissions.

pub mod domain;
pub mod errors;
pub mod forms;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use forms::*;
pub use repositories::*;
pub use services::*;
