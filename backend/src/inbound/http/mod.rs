//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod auth_cookie;
pub mod cookie_config;
pub mod courses;
pub mod error;
pub mod health;
pub mod init;
pub mod responses;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use self::validation::invalid_payload_error;

/// JSON body limits and error mapping shared by every JSON endpoint.
///
/// Malformed bodies and unknown fields surface as `invalid_payload` errors in
/// the standard envelope instead of Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(10 * 1024 * 1024)
        .error_handler(|err, _req| invalid_payload_error(err).into())
}

/// Query-string error mapping matching [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| invalid_payload_error(err).into())
}

/// Register every `/api` route.
///
/// Health probes live outside the scope and are registered by the server.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/api")
                .service(init::init)
                .service(auth::login)
                .service(auth::logout)
                .service(courses::get_courses)
                .service(courses::create_course)
                .service(courses::update_course)
                .service(courses::delete_course)
                .service(courses::download_brochure)
                .service(users::list_users)
                .service(users::current_user)
                .service(users::create_user),
        );
}
