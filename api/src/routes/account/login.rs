use actix_web::{web, HttpRequest, HttpResponse};

use ms_core::forms::LoginForm;
use ms_core::repositories::UserRepository;
use ms_core::services::{AuthenticationService, SessionStore};

use crate::dto::{AccountResponse, UserResponse};
use crate::handlers::ApiError;
use crate::i18n::{response_message, RequestLanguage};
use crate::middleware::SessionId;

use super::AppState;

/// Handler for POST /api/v1/user/login
///
/// Logs in the user identified by `{username, password}` on a freshly minted
/// session id, which replaces the session cookie.
/// A rejected credential yields a single form-level error.
pub async fn login<U, S, A>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, A>>,
    session: SessionId,
    RequestLanguage(lang): RequestLanguage,
    form: web::Json<LoginForm>,
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
        .login(&ctx, &form)
        .await
        .map_err(ApiError::localized(lang))?;
    SessionId::renew(&req, signed_in.session_id);
    let user = signed_in.user;

    log::info!("User {} logged in", user.id);
    Ok(HttpResponse::Ok().json(AccountResponse {
        message: response_message("logged_in", lang),
        user: UserResponse::from(&user),
    }))
}
