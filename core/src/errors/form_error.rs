//! Field- and form-scoped validation errors produced by the account forms
//!
//! Every error carries a stable `code` so the presentation layer can pick a
//! localized message; `message` holds the English default.

use std::fmt;

/// Stable error codes used by the account forms
pub mod codes {
    pub const USERNAME_REQUIRED: &str = "username_required";
    pub const PASSWORD_REQUIRED: &str = "password_required";
    pub const USERNAME_LENGTH: &str = "username_length";
    pub const PASSWORD_LENGTH: &str = "password_length";
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const USERNAME_TAKEN: &str = "username_taken";
    pub const EMAIL_TAKEN: &str = "email_taken";
    pub const EMAIL_BOUND_ELSEWHERE: &str = "email_bound_elsewhere";
    pub const PASSWORD_MISMATCH: &str = "password_mismatch";
    pub const CODE_MISMATCH: &str = "code_mismatch";
    pub const CODE_BLANK: &str = "code_blank";
    pub const NOT_LOGGED_IN: &str = "not_logged_in";
    pub const NICKNAME_BLANK: &str = "nickname_blank";
    pub const NICKNAME_LENGTH: &str = "nickname_length";
    pub const EMAIL_ALREADY_BOUND: &str = "email_already_bound";
    pub const EMAIL_INVALID: &str = "email_invalid";
}

/// Classification of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormErrorKind {
    /// Format or length violation on a single field
    FieldSyntax,
    /// Value already present in the user store
    UniquenessConflict,
    /// Password confirmation or verification code does not match
    Mismatch,
    /// Acting while not logged in
    AuthenticationRequired,
    /// Operation conflicts with the current account state
    StateConflict,
    /// The authentication service rejected the credentials
    InvalidCredentials,
}

/// Where an error is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorScope {
    Field(String),
    Form,
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub scope: ErrorScope,
    pub kind: FormErrorKind,
    pub code: String,
    pub message: String,
}

impl FormError {
    pub fn field(
        field: impl Into<String>,
        kind: FormErrorKind,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            scope: ErrorScope::Field(field.into()),
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn form(kind: FormErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            scope: ErrorScope::Form,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field, `None` for form-scoped errors
    pub fn field_name(&self) -> Option<&str> {
        match &self.scope {
            ErrorScope::Field(name) => Some(name),
            ErrorScope::Form => None,
        }
    }

    pub fn is_form_scoped(&self) -> bool {
        self.scope == ErrorScope::Form
    }

    pub fn invalid_credentials() -> Self {
        Self::form(
            FormErrorKind::InvalidCredentials,
            codes::INVALID_CREDENTIALS,
            "Invalid username or password",
        )
    }

    pub fn username_taken() -> Self {
        Self::field(
            "username",
            FormErrorKind::UniquenessConflict,
            codes::USERNAME_TAKEN,
            "Username already exists",
        )
    }

    pub fn email_taken() -> Self {
        Self::field(
            "email",
            FormErrorKind::UniquenessConflict,
            codes::EMAIL_TAKEN,
            "Email already exists",
        )
    }

    pub fn email_bound_elsewhere() -> Self {
        Self::field(
            "email",
            FormErrorKind::UniquenessConflict,
            codes::EMAIL_BOUND_ELSEWHERE,
            "This email is already bound to another account",
        )
    }

    pub fn password_mismatch() -> Self {
        Self::field(
            "password_again",
            FormErrorKind::Mismatch,
            codes::PASSWORD_MISMATCH,
            "The two passwords do not match",
        )
    }

    pub fn code_mismatch() -> Self {
        Self::form(
            FormErrorKind::Mismatch,
            codes::CODE_MISMATCH,
            "Invalid verification code",
        )
    }

    pub fn code_blank() -> Self {
        Self::field(
            "verification_code",
            FormErrorKind::FieldSyntax,
            codes::CODE_BLANK,
            "Verification code cannot be empty",
        )
    }

    pub fn not_logged_in() -> Self {
        Self::form(
            FormErrorKind::AuthenticationRequired,
            codes::NOT_LOGGED_IN,
            "Not logged in",
        )
    }

    pub fn nickname_blank() -> Self {
        Self::field(
            "nickname_new",
            FormErrorKind::FieldSyntax,
            codes::NICKNAME_BLANK,
            "New nickname cannot be empty",
        )
    }

    pub fn email_already_bound() -> Self {
        Self::form(
            FormErrorKind::StateConflict,
            codes::EMAIL_ALREADY_BOUND,
            "You have already bound an email",
        )
    }

    pub fn email_invalid() -> Self {
        Self::field(
            "email",
            FormErrorKind::FieldSyntax,
            codes::EMAIL_INVALID,
            "Enter a valid email address",
        )
    }
}

/// Every failure found while validating one submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<FormError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FormError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FormError] {
        &self.errors
    }

    pub fn has_kind(&self, kind: FormErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Whether any error is attached to `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field_name() == Some(field))
    }

    pub fn form_errors(&self) -> impl Iterator<Item = &FormError> {
        self.errors.iter().filter(|e| e.is_form_scoped())
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl From<FormError> for FormErrors {
    fn from(error: FormError) -> Self {
        Self { errors: vec![error] }
    }
}

impl From<validator::ValidationErrors> for FormErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FormErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                out.push(FormError::field(
                    field.to_string(),
                    FormErrorKind::FieldSyntax,
                    error.code.to_string(),
                    message,
                ));
            }
        }
        out
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| match e.field_name() {
                Some(field) => format!("{}: {}", field, e.message),
                None => e.message.clone(),
            })
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}
