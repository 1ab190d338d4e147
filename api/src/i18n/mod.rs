//! Bilingual messages for form errors and API responses
//!
//! Messages are keyed by the stable codes carried on form errors, so the
//! domain layer never deals with translations.

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::future::{ready, Ready};

pub use ms_shared::Language;

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub zh: String,
}

impl LocalizedText {
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::English => &self.en,
            Language::Chinese => &self.zh,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Messages {
    #[serde(default)]
    pub form: HashMap<String, LocalizedText>,
    #[serde(default)]
    pub response: HashMap<String, LocalizedText>,
}

pub static MESSAGES: Lazy<Messages> = Lazy::new(|| {
    toml::from_str(include_str!("../../i18n/messages.toml")).unwrap_or_else(|e| {
        log::error!("Failed to parse message catalog: {}", e);
        Messages::default()
    })
});

/// Localized text for a form error code, `fallback` when the code is unknown
pub fn form_message(code: &str, lang: Language, fallback: &str) -> String {
    MESSAGES
        .form
        .get(code)
        .map(|text| text.get(lang).to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// Localized text for an HTTP-level message key
pub fn response_message(key: &str, lang: Language) -> String {
    MESSAGES
        .response
        .get(key)
        .map(|text| text.get(lang).to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Language negotiated from the request's `Accept-Language` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLanguage(pub Language);

impl RequestLanguage {
    pub fn from_request_headers(req: &HttpRequest) -> Self {
        let lang = req
            .headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Language::from_accept_language)
            .unwrap_or_default();
        RequestLanguage(lang)
    }
}

impl FromRequest for RequestLanguage {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_request_headers(req)))
    }
}
