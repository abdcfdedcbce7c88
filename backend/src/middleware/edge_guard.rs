//! Cookie-presence redirects for the dashboard and login pages.
//!
//! The guard only checks that an `authToken` cookie exists. Handlers still
//! verify the token; this layer just keeps signed-out browsers away from
//! `/dashboard` and signed-in browsers away from `/login`.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::HttpResponse;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::inbound::http::cookie_config::AUTH_COOKIE;

const DASHBOARD: &str = "/dashboard";
const LOGIN: &str = "/login";

fn is_dashboard(path: &str) -> bool {
    path == DASHBOARD
        || path
            .strip_prefix(DASHBOARD)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Where a request should be sent instead, if anywhere.
fn redirect_target(path: &str, has_token: bool) -> Option<&'static str> {
    match (is_dashboard(path), path == LOGIN, has_token) {
        (true, _, false) => Some(LOGIN),
        (_, true, true) => Some(DASHBOARD),
        _ => None,
    }
}

/// Middleware issuing `303 See Other` redirects based on cookie presence.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::middleware::EdgeGuard;
///
/// let app = App::new().wrap(EdgeGuard);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeGuard;

impl<S, B> Transform<S, ServiceRequest> for EdgeGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = EdgeGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(EdgeGuardMiddleware { service }))
    }
}

/// Service wrapper produced by [`EdgeGuard`].
pub struct EdgeGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for EdgeGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let has_token = req.cookie(AUTH_COOKIE).is_some();
        if let Some(location) = redirect_target(req.path(), has_token) {
            debug!(path = req.path(), location, "edge guard redirect");
            let response = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location))
                .finish();
            let res = req.into_response(response).map_into_right_body();
            return Box::pin(async move { Ok(res) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
