//! Cookie-based session identification.
//!
//! Every request is assigned a session id taken from the session cookie.
//! When the cookie is missing or malformed a fresh id is minted and set on
//! the response. Handlers obtain the id through the [`SessionId`] extractor
//! and swap it with [`SessionId::renew`] when a login moves the session.

use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use ms_shared::SessionConfig;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

const MAX_SESSION_ID_LENGTH: usize = 64;

/// Session identifier attached to the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId {
    pub value: String,
    /// Minted for this request rather than read from the cookie
    pub is_new: bool,
}

impl SessionId {
    fn mint() -> Self {
        Self {
            value: Uuid::new_v4().simple().to_string(),
            is_new: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Replace the session id for the rest of this request
    ///
    /// The middleware sends the new id back as the session cookie.
    pub fn renew(req: &HttpRequest, value: String) {
        req.extensions_mut().insert(SessionId { value, is_new: true });
    }
}

/// Accept only ids that could have been minted by this server
fn is_well_formed(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_SESSION_ID_LENGTH && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Session cookie middleware factory
pub struct SessionCookie {
    config: Rc<SessionConfig>,
}

impl SessionCookie {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionCookie
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionCookieMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionCookieMiddleware {
            service: Rc::new(service),
            config: Rc::clone(&self.config),
        }))
    }
}

/// Session cookie middleware service
pub struct SessionCookieMiddleware<S> {
    service: Rc<S>,
    config: Rc<SessionConfig>,
}

impl<S, B> Service<ServiceRequest> for SessionCookieMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let config = Rc::clone(&self.config);

        Box::pin(async move {
            let session = match req.cookie(&config.cookie_name) {
                Some(cookie) if is_well_formed(cookie.value()) => SessionId {
                    value: cookie.value().to_string(),
                    is_new: false,
                },
                _ => SessionId::mint(),
            };

            req.extensions_mut().insert(session);
            let mut res = service.call(req).await?;

            let current = res.request().extensions().get::<SessionId>().cloned();
            if let Some(session) = current.filter(|s| s.is_new) {
                let cookie = build_cookie(&config, session.value);
                if let Err(e) = res.response_mut().add_cookie(&cookie) {
                    log::warn!("Failed to set session cookie: {}", e);
                }
            }
            Ok(res)
        })
    }
}

fn build_cookie(config: &SessionConfig, value: String) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .max_age(Duration::seconds(config.timeout as i64))
        .finish()
}

/// Extractor for the current session id
impl FromRequest for SessionId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<SessionId>()
            .cloned()
            .ok_or_else(|| ErrorInternalServerError("Session middleware is not installed"));

        ready(result)
    }
}
