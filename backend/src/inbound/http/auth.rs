//! Login and logout handlers.
//!
//! ```text
//! POST /api/auth/login {"username":"admin","password":"admin123"}
//! POST /api/auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{MessageResponse, TokenResponse};
use crate::inbound::http::schemas::{ErrorSchema, MessageResponseSchema, TokenResponseSchema};
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/auth/login`.
///
/// Example JSON:
/// `{"username":"admin","password":"admin123"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Verify credentials, issue a token, and set the auth cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            headers(("Set-Cookie" = String, description = "authToken cookie")),
            body = TokenResponseSchema
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let token = state.login.login(&credentials).await?.into_string();
    Ok(HttpResponse::Ok()
        .cookie(state.cookie.token_cookie(token.clone()))
        .json(TokenResponse {
            success: true,
            token,
        }))
}

/// Clear the auth cookie. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (
            status = 200,
            description = "Logged out",
            headers(("Set-Cookie" = String, description = "Expired authToken cookie")),
            body = MessageResponseSchema
        )
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.cookie.removal_cookie())
        .json(MessageResponse::new("Logged out successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::time;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use rstest_bdd_macros::given;
    use serde_json::Value;

    use crate::inbound::http::cookie_config::AUTH_COOKIE;
    use crate::inbound::http::json_config;
    use crate::test_support::app::{ADMIN_PASSWORD, ADMIN_USERNAME, TestCatalogue};

    async fn post_login(
        catalogue: &TestCatalogue,
        body: Value,
    ) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(catalogue.state.clone()))
                .app_data(json_config())
                .service(web::scope("/api").service(login).service(logout)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&body)
            .to_request();
        actix_test::call_service(&app, request).await
    }

    #[given("the seeded admin credentials")]
    fn the_seeded_admin_credentials() -> Value {
        json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD })
    }

    async fn the_client_logs_in(body: Value) -> actix_web::dev::ServiceResponse {
        let catalogue = TestCatalogue::seeded(std::time::Duration::ZERO).await;
        post_login(&catalogue, body).await
    }

    async fn a_token_is_returned_and_stored(response: actix_web::dev::ServiceResponse) {
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == AUTH_COOKIE)
            .expect("auth cookie set")
            .into_owned();
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["token"].as_str(), Some(cookie.value()));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(24)));
    }

    #[rstest]
    #[actix_web::test]
    async fn login_happy_path() {
        let body = the_seeded_admin_credentials();
        let response = the_client_logs_in(body).await;
        a_token_is_returned_and_stored(response).await;
    }

    #[rstest]
    #[case::wrong_password(json!({ "username": "admin", "password": "nope" }))]
    #[case::unknown_user(json!({ "username": "ghost", "password": "admin123" }))]
    #[actix_web::test]
    async fn bad_credentials_are_rejected_without_cookie(#[case] body: Value) {
        let response = the_client_logs_in(body).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(
            response
                .response()
                .cookies()
                .all(|cookie| cookie.name() != AUTH_COOKIE)
        );
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("invalid credentials"));
        assert!(body.get("token").is_none());
    }

    #[rstest]
    #[case(json!({ "username": "", "password": "pw" }), "username", "empty_username")]
    #[case(json!({ "username": "admin", "password": "" }), "password", "empty_password")]
    #[actix_web::test]
    async fn blank_fields_are_invalid(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let response = the_client_logs_in(body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], json!("invalid_request"));
        assert_eq!(body["details"]["field"], json!(field));
        assert_eq!(body["details"]["code"], json!(code));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_fields_are_rejected() {
        let body = json!({ "username": "admin", "password": "admin123", "role": "root" });
        let response = the_client_logs_in(body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["code"], json!("invalid_payload"));
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_clears_cookie() {
        let catalogue = TestCatalogue::seeded(std::time::Duration::ZERO).await;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(catalogue.state.clone()))
                .service(web::scope("/api").service(logout)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/logout")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == AUTH_COOKIE)
            .expect("removal cookie set")
            .into_owned();
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!({ "success": true, "message": "Logged out successfully" })
        );
    }
}
