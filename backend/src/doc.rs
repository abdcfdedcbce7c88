//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: wrappers for domain types and response envelopes that
//!   provide OpenAPI definitions without coupling domain types to utoipa
//! - **Security**: the `authToken` cookie scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::courses::{CreateCourseRequest, UpdateCourseRequest};
use crate::inbound::http::schemas::{
    CourseListResponseSchema, CourseResponseSchema, CourseSchema, ErrorCodeSchema, ErrorSchema,
    MessageResponseSchema, TokenResponseSchema, UserListResponseSchema, UserProfileSchema,
    UserResponseSchema,
};
use crate::inbound::http::users::CreateUserRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the auth cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AuthCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "authToken",
                "Signed token cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Course catalogue API",
        description = "HTTP interface for managing courses, brochures, and catalogue users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("AuthCookie" = [])),
    paths(
        crate::inbound::http::init::init,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::courses::get_courses,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::courses::download_brochure,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CourseSchema,
        UserProfileSchema,
        TokenResponseSchema,
        MessageResponseSchema,
        CourseResponseSchema,
        CourseListResponseSchema,
        UserResponseSchema,
        UserListResponseSchema,
        LoginRequest,
        CreateCourseRequest,
        UpdateCourseRequest,
        CreateUserRequest,
    )),
    tags(
        (name = "auth", description = "Login, logout, and first-run initialisation"),
        (name = "courses", description = "Course catalogue and brochure downloads"),
        (name = "users", description = "Catalogue user administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
