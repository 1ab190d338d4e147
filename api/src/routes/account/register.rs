use actix_web::{web, HttpRequest, HttpResponse};

use ms_core::forms::RegistrationForm;
use ms_core::repositories::UserRepository;
use ms_core::services::{AuthenticationService, SessionStore};

use crate::dto::{AccountResponse, UserResponse};
use crate::handlers::ApiError;
use crate::i18n::{response_message, RequestLanguage};
use crate::middleware::SessionId;

use super::AppState;

/// Handler for POST /api/v1/user/register
///
/// Creates the account and logs it in on a freshly minted session id. The
/// verification code must have been issued to the previous session with
/// purpose `register`.
pub async fn register<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    session: SessionId,
    RequestLanguage(lang): RequestLanguage,
    form: web::Json<RegistrationForm>,
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

    let signed_in = service
        .register(&ctx, &form)
        .await
        .map_err(ApiError::localized(lang))?;
    SessionId::renew(&req, signed_in.session_id);
    let user = signed_in.user;

    log::info!("Registered user {}", user.id);
    Ok(HttpResponse::Created().json(AccountResponse {
        message: response_message("registered", lang),
        user: UserResponse::from(&user),
    }))
}
