use actix_web::{web, HttpResponse};

use ms_core::forms::ChangeNicknameForm;
use ms_core::repositories::UserRepository;
use ms_core::services::{AuthenticationService, SessionStore};

use crate::dto::{AccountResponse, UserResponse};
use crate::handlers::ApiError;
use crate::i18n::{response_message, RequestLanguage};
use crate::middleware::SessionId;

use super::AppState;

/// Handler for POST /api/v1/user/change-nickname
pub async fn change_nickname<U, S, A>(
    state: web::Data<AppState<U, S, A>>,
    session: SessionId,
    RequestLanguage(lang): RequestLanguage,
    form: web::Json<ChangeNicknameForm>,
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
        .change_nickname(&ctx, &form)
        .await
        .map_err(ApiError::localized(lang))?;

    Ok(HttpResponse::Ok().json(AccountResponse {
        message: response_message("nickname_changed", lang),
        user: UserResponse::from(&user),
    }))
}
