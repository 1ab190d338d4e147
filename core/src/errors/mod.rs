//! Domain-specific error types and error handling.

mod form_error;


pub use form_error::{codes, ErrorScope, FormError, FormErrorKind, FormErrors};

use thiserror::Error;

/// Core domain errors
///
/// A rejected submission travels as `Form`; every other variant is a fault
/// in one of the collaborators the forms depend on.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Form validation failed: {0}")]
    Form(#[from] FormErrors),

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// The form errors carried by a rejected submission, if this is one
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            DomainError::Form(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FormError> for DomainError {
    fn from(error: FormError) -> Self {
        DomainError::Form(error.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
