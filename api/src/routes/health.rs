use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

use ms_core::repositories::UserRepository;
use ms_core::services::{AuthenticationService, SessionStore};

use super::account::AppState;

/// Handler for GET /health
///
/// 200 when every registered backing service answers, 503 otherwise.
pub async fn health_check<U, S, A>(state: web::Data<AppState<U, S, A>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    A: AuthenticationService + 'static,
{
    let mut components = Map::new();
    let mut healthy = true;
    for check in &state.health_checks {
        let up = check.is_healthy().await;
        healthy &= up;
        components.insert(check.name().to_string(), Value::from(if up { "up" } else { "down" }));
    }

    let body = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "service": "mysite-api",
        "version": env!("CARGO_PKG_VERSION"),
        "components": components,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        log::warn!("Health check failed: {}", body["components"]);
        HttpResponse::ServiceUnavailable().json(body)
    }
}
