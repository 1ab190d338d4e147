use actix_web::{web, HttpResponse};

use ms_core::repositories::UserRepository;
use ms_core::services::{AuthenticationService, SessionStore};

use crate::dto::MessageResponse;
use crate::handlers::ApiError;
use crate::i18n::{response_message, RequestLanguage};
use crate::middleware::SessionId;

use super::AppState;

/// Handler for POST /api/v1/user/logout
///
/// Idempotent: logging out an anonymous session succeeds.
pub async fn logout<U, S, A>(
    state: web::Data<AppState<U, S, A>>,
    session: SessionId,
    RequestLanguage(lang): RequestLanguage,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    A: AuthenticationService + 'static,
{
    let service = &state.account_service;
    let ctx = service
        .context(session.as_str())
        .await
        .map_err(ApiError::localized(lang))?;
    service.logout(&ctx).await.map_err(ApiError::localized(lang))?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: response_message("logged_out", lang),
    }))
}
