use actix_web::{web, HttpResponse};

use ms_core::repositories::UserRepository;
use ms_core::services::{AuthenticationService, SessionStore};

use crate::dto::{CurrentUserResponse, UserResponse};
use crate::handlers::ApiError;
use crate::i18n::RequestLanguage;
use crate::middleware::SessionId;

use super::AppState;

/// Handler for GET /api/v1/user/me
///
/// Always 200; `authenticated` tells whether the session is logged in.
pub async fn me<U, S, A>(
    state: web::Data<AppState<U, S, A>>,
    session: SessionId,
    RequestLanguage(lang): RequestLanguage,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    A: AuthenticationService + 'static,
{
    let user = state
        .account_service
        .current_user(session.as_str())
        .await
        .map_err(ApiError::localized(lang))?;

    Ok(HttpResponse::Ok().json(CurrentUserResponse {
        authenticated: user.is_some(),
        user: user.as_ref().map(UserResponse::from),
    }))
}
