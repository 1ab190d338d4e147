//! Integration tests for the account endpoints
//!
//! The application is built with the in-memory collaborators from the core
//! crate; the session cookie set by the first response is carried over to
//! later requests the way a browser would.

use std::sync::Arc;

use actix_web::{cookie::Cookie, http::header, test, web};
use serde_json::{json, Value};

use ms_api::{create_app, AppState};
use ms_core::domain::entities::user::User;
use ms_core::errors::codes;
use ms_core::repositories::MockUserRepository;
use ms_core::services::{
    mock_password_hash, AccountService, AccountServiceConfig, MockAuthenticationService, MockSessionStore,
};
use ms_shared::{AppConfig, Environment};

type TestState = AppState<MockUserRepository, MockSessionStore, MockAuthenticationService<MockUserRepository>>;

fn state_with(users: Vec<User>, environment: Environment) -> web::Data<TestState> {
    let users = Arc::new(MockUserRepository::with_users(users));
    let auth = Arc::new(MockAuthenticationService::new(users.clone()));
    let service = AccountService::new(
        users,
        Arc::new(MockSessionStore::new()),
        auth,
        AccountServiceConfig::default(),
    );
    web::Data::new(AppState::new(Arc::new(service), environment))
}

fn config_for(environment: Environment) -> AppConfig {
    AppConfig {
        environment,
        ..AppConfig::default()
    }
}

fn session_cookie<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "sessionid")
        .map(|c| c.into_owned())
}

fn error_codes(body: &Value) -> Vec<String> {
    body["details"]["codes"]
        .as_array()
        .map(|codes| codes.iter().filter_map(|c| c.as_str().map(String::from)).collect())
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_register_then_change_nickname() {
    let env = Environment::Development;
    let app = test::init_service(create_app(state_with(vec![], env), &config_for(env))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/send-code")
        .set_json(json!({ "email": "carol@example.com", "purpose": "register" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let cookie = session_cookie(&resp).expect("session cookie should be issued");
    let body: Value = test::read_body_json(resp).await;
    let code = body["code"].as_str().expect("code is echoed outside production").to_string();
    assert!(body["expires_in"].as_u64().unwrap() > 0);

    let req = test::TestRequest::post()
        .uri("/api/v1/user/register")
        .cookie(cookie.clone())
        .set_json(json!({
            "username": " carol ",
            "password": "hunter22",
            "password_again": "hunter22",
            "email": "carol@example.com",
            "verification_code": code,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let signed_in = session_cookie(&resp).expect("registration renews the session");
    assert_ne!(signed_in.value(), cookie.value());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["username"], "carol");

    // The pre-registration id is not logged in
    let req = test::TestRequest::get()
        .uri("/api/v1/user/me")
        .cookie(cookie)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], false);
    let cookie = signed_in;

    let req = test::TestRequest::get()
        .uri("/api/v1/user/me")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["email"], "carol@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/user/change-nickname")
        .cookie(cookie.clone())
        .set_json(json!({ "nickname_new": "Caz" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["display_name"], "Caz");

    let req = test::TestRequest::post()
        .uri("/api/v1/user/logout")
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri("/api/v1/user/me")
        .cookie(cookie)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], false);
}

#[actix_web::test]
async fn test_login_then_bind_email() {
    let env = Environment::Development;
    let dave = User::new("dave".to_string(), String::new(), mock_password_hash("secret1"));
    let app = test::init_service(create_app(state_with(vec![dave], env), &config_for(env))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/login")
        .set_json(json!({ "username": "dave", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/user/send-code")
        .cookie(cookie.clone())
        .set_json(json!({ "email": "dave@example.com", "purpose": "bind_email" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let code = body["code"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/user/bind-email")
        .cookie(cookie.clone())
        .set_json(json!({ "email": "dave@example.com", "verification_code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "dave@example.com");

    // A second bind is refused now that an email is on the account
    let req = test::TestRequest::post()
        .uri("/api/v1/user/bind-email")
        .cookie(cookie)
        .set_json(json!({ "email": "other@example.com", "verification_code": "000000" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_codes(&body), vec![codes::EMAIL_ALREADY_BOUND]);
}

#[actix_web::test]
async fn test_change_nickname_requires_login() {
    let env = Environment::Development;
    let app = test::init_service(create_app(state_with(vec![], env), &config_for(env))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/change-nickname")
        .set_json(json!({ "nickname_new": "Caz" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert!(error_codes(&body).contains(&codes::NOT_LOGGED_IN.to_string()));
}

#[actix_web::test]
async fn test_register_errors_are_localized_and_aggregated() {
    let env = Environment::Development;
    let app = test::init_service(create_app(state_with(vec![], env), &config_for(env))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/register")
        .insert_header((header::ACCEPT_LANGUAGE, "zh-CN,zh;q=0.9"))
        .set_json(json!({
            "username": "erin",
            "password": "hunter22",
            "password_again": "hunter23",
            "email": "erin@example.com",
            "verification_code": "123456",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    let found = error_codes(&body);
    assert!(found.contains(&codes::PASSWORD_MISMATCH.to_string()));
    assert!(found.contains(&codes::CODE_MISMATCH.to_string()));
    assert_eq!(body["details"]["fields"]["password_again"][0], "两次输入的密码不一致");
}

#[actix_web::test]
async fn test_login_with_wrong_password() {
    let env = Environment::Development;
    let dave = User::new("dave".to_string(), String::new(), mock_password_hash("secret1"));
    let app = test::init_service(create_app(state_with(vec![dave], env), &config_for(env))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/login")
        .set_json(json!({ "username": "dave", "password": "wrong-one" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_codes(&body), vec![codes::INVALID_CREDENTIALS]);
    assert_eq!(body["details"]["form"][0], "Invalid username or password");
}

#[actix_web::test]
async fn test_send_code_rejects_unknown_purpose() {
    let env = Environment::Development;
    let app = test::init_service(create_app(state_with(vec![], env), &config_for(env))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/send-code")
        .set_json(json!({ "email": "carol@example.com", "purpose": "reset_password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_codes(&body), vec!["purpose_invalid"]);
    assert!(body["details"]["fields"]["purpose"].is_array());
}

#[actix_web::test]
async fn test_bind_code_requires_login() {
    let env = Environment::Development;
    let app = test::init_service(create_app(state_with(vec![], env), &config_for(env))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/send-code")
        .set_json(json!({ "email": "carol@example.com", "purpose": "bind_email" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_production_does_not_echo_code() {
    let env = Environment::Production;
    let app = test::init_service(create_app(state_with(vec![], env), &config_for(env))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/send-code")
        .set_json(json!({ "email": "carol@example.com", "purpose": "register" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("code").is_none());
}

#[actix_web::test]
async fn test_malformed_body_and_unknown_route() {
    let env = Environment::Development;
    let app = test::init_service(create_app(state_with(vec![], env), &config_for(env))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");

    let req = test::TestRequest::get().uri("/api/v1/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_planted_session_id_stays_anonymous_after_login() {
    let env = Environment::Development;
    let dave = User::new("dave".to_string(), String::new(), mock_password_hash("secret1"));
    let app = test::init_service(create_app(state_with(vec![dave], env), &config_for(env))).await;
    let planted = Cookie::new("sessionid", "attackerchosen1");

    let req = test::TestRequest::post()
        .uri("/api/v1/user/login")
        .cookie(planted.clone())
        .set_json(json!({ "username": "dave", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let issued = session_cookie(&resp).expect("login sets a new session cookie");
    assert_ne!(issued.value(), planted.value());

    let req = test::TestRequest::get()
        .uri("/api/v1/user/me")
        .cookie(planted)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], false);

    let req = test::TestRequest::get()
        .uri("/api/v1/user/me")
        .cookie(issued)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["username"], "dave");
}
