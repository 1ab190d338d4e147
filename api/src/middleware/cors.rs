//! CORS middleware configuration for cross-origin requests.
//!
//! The account endpoints rely on the session cookie, so every configuration
//! supports credentials. Development accepts any origin; production only
//! the configured ones.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use ms_shared::Environment;

/// Preflight cache lifetime in seconds
const MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for `environment`.
///
/// `allowed_origins` comes from `ALLOWED_ORIGINS` and is ignored outside
/// production.
pub fn create_cors(environment: Environment, allowed_origins: &[String]) -> Cors {
    if environment.is_production() {
        create_production_cors(allowed_origins)
    } else {
        create_development_cors()
    }
}

fn create_development_cors() -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(MAX_AGE)
        .supports_credentials()
}

fn create_production_cors(allowed_origins: &[String]) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
        ])
        .max_age(MAX_AGE)
        .supports_credentials();

    for origin in allowed_origins.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}
