//! Mapping from domain errors to localized HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use ms_core::errors::{DomainError, FormErrorKind, FormErrors};
use ms_shared::{error_codes, ErrorResponse, IntoErrorResponse};

use crate::dto::{ErrorResponseExt, FormErrorDetails};
use crate::i18n::{form_message, response_message, Language};

/// A failed request, rendered in the caller's language
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: DomainError,
    pub lang: Language,
}

impl ApiError {
    pub fn new(error: DomainError, lang: Language) -> Self {
        Self { error, lang }
    }

    /// Closure for `map_err` that tags a domain error with `lang`
    pub fn localized(lang: Language) -> impl Fn(DomainError) -> Self {
        move |error| Self::new(error, lang)
    }

    fn requires_login(errors: &FormErrors) -> bool {
        errors.has_kind(FormErrorKind::AuthenticationRequired)
    }
}

/// Localized field and form messages for a rejected submission
pub fn form_error_details(errors: &FormErrors, lang: Language) -> FormErrorDetails {
    let mut details = FormErrorDetails::default();
    for error in errors.errors() {
        let message = form_message(&error.code, lang, &error.message);
        match error.field_name() {
            Some(field) => details.fields.entry(field.to_string()).or_default().push(message),
            None => details.form.push(message),
        }
        details.codes.push(error.code.clone());
    }
    details
}

impl IntoErrorResponse for ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        let lang = self.lang;
        match &self.error {
            DomainError::Form(errors) => {
                let (code, key) = if Self::requires_login(errors) {
                    (error_codes::UNAUTHORIZED, "unauthorized")
                } else {
                    (error_codes::VALIDATION_ERROR, "validation_failed")
                };
                let details = form_error_details(errors, lang);
                ErrorResponse::new(code, response_message(key, lang))
                    .add_detail("fields", details.fields)
                    .add_detail("form", details.form)
                    .add_detail("codes", details.codes)
            }
            DomainError::NotFound { .. } => {
                ErrorResponse::new(error_codes::NOT_FOUND, response_message("not_found", lang))
            }
            DomainError::Database(_) => {
                ErrorResponse::new(error_codes::DATABASE_ERROR, response_message("internal_error", lang))
            }
            DomainError::Session(_) => {
                ErrorResponse::new(error_codes::SESSION_ERROR, response_message("internal_error", lang))
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, response_message("internal_error", lang))
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.error {
            DomainError::Form(errors) if Self::requires_login(errors) => StatusCode::UNAUTHORIZED,
            DomainError::Form(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Database(_) | DomainError::Session(_) | DomainError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self.error);
        } else {
            log::debug!("Request rejected: {}", self.error);
        }
        self.to_error_response().to_response(status)
    }
}
