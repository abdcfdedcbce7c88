//! Token authentication extractor for HTTP handlers.
//!
//! Handlers that take an [`AuthSession`] argument only run for requests that
//! carry a valid signed token, either in the `authToken` cookie or as an
//! `Authorization: Bearer` header. Anything else is rejected with
//! `401 Unauthorized` before the handler body executes.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::{AuthenticatedUser, Error, Username};

use super::cookie_config::AUTH_COOKIE;
use super::state::HttpState;

const UNAUTHORIZED: &str = "Unauthorized";

/// Identity proven by the request's auth token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession(AuthenticatedUser);

impl AuthSession {
    pub fn username(&self) -> &Username {
        &self.0.username
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

/// Raw token from the cookie, falling back to the bearer header.
fn request_token(req: &HttpRequest) -> Option<String> {
    req.cookie(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
        .or_else(|| bearer_token(req))
}

fn authenticate(req: &HttpRequest) -> Result<AuthSession, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = request_token(req).ok_or_else(|| Error::unauthorized(UNAUTHORIZED))?;
    state.login.authenticate(&token).map(AuthSession)
}

impl FromRequest for AuthSession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
