//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the JSON produced by the domain types and the
//! envelopes in [`super::responses`], but live in the inbound adapter layer
//! where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with an existing username or email.
    #[schema(rename = "conflict")]
    Conflict,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for the error envelope.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Name and description are required")]
    error: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Course`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Course, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CourseSchema {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Net101")]
    name: String,
    #[schema(example = "Networking basics")]
    description: String,
    #[schema(example = "3 months")]
    duration: String,
    /// Opaque image payload, usually a data URL.
    image_data: String,
    image_file_name: String,
    /// Data URL, base64, or plain text.
    brochure_data: String,
    #[schema(example = "brochure.pdf")]
    brochure_file_name: String,
    #[schema(value_type = String, example = "2026-03-01T09:00:00Z")]
    created_at: String,
    #[schema(value_type = String, example = "2026-03-01T09:00:00Z")]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::UserProfile`].
///
/// Public profile fields only.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserProfile, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserProfileSchema {
    #[schema(example = "admin")]
    username: String,
    #[schema(example = "admin@miscareer.com")]
    email: String,
    #[schema(example = "Administrator")]
    name: String,
    #[schema(value_type = String, example = "2026-03-01T09:00:00Z")]
    created_at: String,
}

/// `{ "success": true, "token": "..." }`
#[derive(ToSchema)]
#[schema(as = TokenResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TokenResponseSchema {
    #[schema(example = true)]
    success: bool,
    /// Signed session token; also set as the `authToken` cookie.
    token: String,
}

/// `{ "success": true, "message": "..." }`
#[derive(ToSchema)]
#[schema(as = MessageResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MessageResponseSchema {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "Course deleted successfully")]
    message: String,
}

#[derive(ToSchema)]
#[schema(as = CourseResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CourseResponseSchema {
    #[schema(example = true)]
    success: bool,
    data: CourseSchema,
}

#[derive(ToSchema)]
#[schema(as = CourseListResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CourseListResponseSchema {
    #[schema(example = true)]
    success: bool,
    /// Newest first.
    data: Vec<CourseSchema>,
}

#[derive(ToSchema)]
#[schema(as = UserResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserResponseSchema {
    #[schema(example = true)]
    success: bool,
    data: UserProfileSchema,
}

#[derive(ToSchema)]
#[schema(as = UserListResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserListResponseSchema {
    #[schema(example = true)]
    success: bool,
    data: Vec<UserProfileSchema>,
}
