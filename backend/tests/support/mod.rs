//! Shared wiring for HTTP integration tests.
//!
//! Builds the same middleware stack and route table the server uses, on top
//! of the in-memory catalogue from `backend::test_support`.

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use backend::Trace;
use backend::inbound::http::configure_api;
use backend::inbound::http::cookie_config::AUTH_COOKIE;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::middleware::EdgeGuard;
use backend::test_support::app::{ADMIN_PASSWORD, ADMIN_USERNAME};
use serde_json::json;

pub type Response = ServiceResponse<EitherBody<BoxBody>>;

/// Initialise the full application around `state`.
pub async fn init_app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = Response, Error = actix_web::Error> {
    let health = HealthState::new(Arc::clone(&state.status));
    health.mark_ready();
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(health))
            .app_data(web::Data::new(state))
            .wrap(EdgeGuard)
            .wrap(Trace)
            .configure(configure_api)
            .service(ready)
            .service(live),
    )
    .await
}

/// Log in as the seeded admin and return the `authToken` cookie value.
pub async fn login_admin(
    app: &impl Service<actix_http::Request, Response = Response, Error = actix_web::Error>,
) -> String {
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == AUTH_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .expect("auth cookie")
}

pub fn auth_cookie(token: &str) -> Cookie<'static> {
    Cookie::new(AUTH_COOKIE, token.to_owned())
}
