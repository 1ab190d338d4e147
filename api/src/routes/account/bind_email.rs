use actix_web::{web, HttpResponse};

use ms_core::forms::BindEmailForm;
use ms_core::repositories::UserRepository;
use ms_core::services::{AuthenticationService, SessionStore};

use crate::dto::{AccountResponse, UserResponse};
use crate::handlers::ApiError;
use crate::i18n::{response_message, RequestLanguage};
use crate::middleware::SessionId;

use super::AppState;

/// Handler for POST /api/v1/user/bind-email
///
/// Binds `email` to the logged-in account using a code issued with purpose
/// `bind_email`.
pub async fn bind_email<U, S, A>(
    state: web::Data<AppState<U, S, A>>,
    session: SessionId,
    RequestLanguage(lang): RequestLanguage,
    form: web::Json<BindEmailForm>,
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

    let user = service
        .bind_email(&ctx, &form)
        .await
        .map_err(ApiError::localized(lang))?;

    Ok(HttpResponse::Ok().json(AccountResponse {
        message: response_message("email_bound", lang),
        user: UserResponse::from(&user),
    }))
}
