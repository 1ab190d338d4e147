use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use std::collections::HashMap;

pub use ms_shared::ErrorResponse;

// Extension trait for ErrorResponse to add actix-web specific methods
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// `details` payload of a rejected form
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormErrorDetails {
    /// Localized messages per field
    pub fields: HashMap<String, Vec<String>>,
    /// Localized messages that apply to the whole form
    pub form: Vec<String>,
    /// Stable codes of every error, in the order they were found
    pub codes: Vec<String>,
}
