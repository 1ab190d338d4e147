//! Application factory
//!
//! Builds the Actix-web application around a shared [`AppState`] so the same
//! wiring serves `main` and the integration tests.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    middleware::Logger,
    web, App, HttpRequest, HttpResponse,
};

use ms_core::repositories::UserRepository;
use ms_core::services::{AuthenticationService, SessionStore};
use ms_shared::{error_codes, AppConfig, ErrorResponse};

use crate::dto::ErrorResponseExt;
use crate::i18n::{response_message, RequestLanguage};
use crate::middleware::{create_cors, SessionCookie};
use crate::routes::account::{
    bind_email::bind_email, change_nickname::change_nickname, login::login, logout::logout, me::me,
    register::register, send_code::send_code, AppState,
};
use crate::routes::health::health_check;

/// Create and configure the application with all dependencies
pub fn create_app<U, S, A>(
    app_state: web::Data<AppState<U, S, A>>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    A: AuthenticationService + 'static,
{
    let cors = create_cors(config.environment, &config.server.allowed_origins);
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Last wrap runs first: logging, then CORS, then session
        .wrap(SessionCookie::new(config.session.clone()))
        .wrap(cors)
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check::<U, S, A>))
        .service(
            web::scope("/api/v1/user")
                .route("/send-code", web::post().to(send_code::<U, S, A>))
                .route("/register", web::post().to(register::<U, S, A>))
                .route("/login", web::post().to(login::<U, S, A>))
                .route("/logout", web::post().to(logout::<U, S, A>))
                .route("/change-nickname", web::post().to(change_nickname::<U, S, A>))
                .route("/bind-email", web::post().to(bind_email::<U, S, A>))
                .route("/me", web::get().to(me::<U, S, A>)),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies become a localized 400 instead of actix's plain text
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let RequestLanguage(lang) = RequestLanguage::from_request_headers(req);
    log::debug!("Rejected request body: {}", err);
    let response = ErrorResponse::new(error_codes::BAD_REQUEST, response_message("bad_request", lang))
        .to_response(StatusCode::BAD_REQUEST);
    InternalError::from_response(err, response).into()
}

async fn not_found(RequestLanguage(lang): RequestLanguage) -> HttpResponse {
    ErrorResponse::new(error_codes::NOT_FOUND, response_message("not_found", lang))
        .to_response(StatusCode::NOT_FOUND)
}
