use actix_web::{web, HttpResponse};

use ms_core::domain::entities::verification_code::CodePurpose;
use ms_core::errors::{FormError, FormErrorKind};
use ms_core::repositories::UserRepository;
use ms_core::services::{AuthenticationService, SessionStore};

use crate::dto::{SendCodeRequest, SendCodeResponse};
use crate::handlers::ApiError;
use crate::i18n::{response_message, RequestLanguage};
use crate::middleware::SessionId;

use super::AppState;

fn invalid_purpose() -> FormError {
    FormError::field(
        "purpose",
        FormErrorKind::FieldSyntax,
        "purpose_invalid",
        "Unknown verification code purpose",
    )
}

/// Handler for POST /api/v1/user/send-code
///
/// Issues a code for `purpose` and stores it in the session. Delivery to
/// `email` happens elsewhere; outside production the code is echoed back in
/// the response so the flow can be exercised without a mailer.
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "purpose": "register" }
/// ```
pub async fn send_code<U, S, A>(
    state: web::Data<AppState<U, S, A>>,
    session: SessionId,
    RequestLanguage(lang): RequestLanguage,
    request: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    A: AuthenticationService + 'static,
{
    let purpose: CodePurpose = request
        .purpose
        .parse()
        .map_err(|_| ApiError::new(invalid_purpose().into(), lang))?;

    let service = &state.account_service;
    let ctx = service
        .context(session.as_str())
        .await
        .map_err(ApiError::localized(lang))?;

    let issued = service
        .issue_code(&ctx, purpose, &request.email)
        .await
        .map_err(ApiError::localized(lang))?;

    Ok(HttpResponse::Ok().json(SendCodeResponse {
        message: response_message("code_sent", lang),
        expires_in: issued.remaining_ttl_seconds(),
        code: (!state.environment.is_production()).then(|| issued.code.clone()),
    }))
}
