//! Course catalogue handlers.
//!
//! ```text
//! GET    /api/courses[?id=<uuid>]
//! POST   /api/courses {"name":"Net101","description":"Networking basics"}
//! PUT    /api/courses?id=<uuid> {"duration":"6 weeks"}
//! DELETE /api/courses?id=<uuid>
//! GET    /api/courses/<uuid>/download
//! ```

use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::{HttpResponse, delete, get, mime, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CourseDraft, CoursePatch, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth_cookie::AuthSession;
use crate::inbound::http::responses::{DataResponse, MessageResponse};
use crate::inbound::http::schemas::{
    CourseListResponseSchema, CourseResponseSchema, ErrorSchema, MessageResponseSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_course_validation_error, parse_course_id};

/// Query string selecting a single course.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CourseIdQuery {
    /// Course identifier (UUID).
    pub id: Option<String>,
}

/// Request body for `POST /api/courses`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Defaults to "3 months".
    pub duration: Option<String>,
    pub image_data: Option<String>,
    pub image_file_name: Option<String>,
    /// Data URL, base64, or plain text.
    pub brochure_data: Option<String>,
    /// Defaults to "brochure.pdf".
    pub brochure_file_name: Option<String>,
}

impl TryFrom<CreateCourseRequest> for CourseDraft {
    type Error = Error;

    fn try_from(value: CreateCourseRequest) -> Result<Self, Self::Error> {
        let name = value.name.unwrap_or_default();
        let description = value.description.unwrap_or_default();
        let draft =
            CourseDraft::try_new(&name, &description).map_err(map_course_validation_error)?;
        Ok(draft
            .with_duration(value.duration)
            .with_image(value.image_data, value.image_file_name)
            .with_brochure(value.brochure_data, value.brochure_file_name))
    }
}

/// Request body for `PUT /api/courses`. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub image_data: Option<String>,
    pub image_file_name: Option<String>,
    pub brochure_data: Option<String>,
    pub brochure_file_name: Option<String>,
}

impl TryFrom<UpdateCourseRequest> for CoursePatch {
    type Error = Error;

    fn try_from(value: UpdateCourseRequest) -> Result<Self, Self::Error> {
        let mut patch = CoursePatch::default()
            .with_name(value.name.as_deref())
            .and_then(|patch| patch.with_description(value.description.as_deref()))
            .map_err(map_course_validation_error)?;
        patch.duration = value.duration;
        patch.image_data = value.image_data;
        patch.image_file_name = value.image_file_name;
        patch.brochure_data = value.brochure_data;
        patch.brochure_file_name = value.brochure_file_name;
        Ok(patch)
    }
}

/// List every course, newest first, or fetch one when `id` is given.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseIdQuery),
    responses(
        (status = 200, description = "Course list, or one course when id is set", body = CourseListResponseSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourses"
)]
#[get("/courses")]
pub async fn get_courses(
    state: web::Data<HttpState>,
    _session: AuthSession,
    query: web::Query<CourseIdQuery>,
) -> ApiResult<HttpResponse> {
    match query.id.as_deref() {
        Some(raw) => {
            let id = parse_course_id(Some(raw))?;
            let course = state.courses_query.get_course(&id).await?;
            Ok(HttpResponse::Ok().json(DataResponse::new(course)))
        }
        None => {
            let courses = state.courses_query.list_courses().await?;
            Ok(HttpResponse::Ok().json(DataResponse::new(courses)))
        }
    }
}

/// Create a course.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Created course", body = CourseResponseSchema),
        (status = 400, description = "Name and description are required", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    session: AuthSession,
    payload: web::Json<CreateCourseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CourseDraft::try_from(payload.into_inner())?;
    let course = state.courses.create_course(draft).await?;
    tracing::info!(course_id = %course.id, username = %session.username(), "course created");
    Ok(HttpResponse::Created().json(DataResponse::new(course)))
}

/// Merge the provided fields into an existing course.
#[utoipa::path(
    put,
    path = "/api/courses",
    params(CourseIdQuery),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Updated course", body = CourseResponseSchema),
        (status = 400, description = "Missing or malformed id, or blank field", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses")]
pub async fn update_course(
    state: web::Data<HttpState>,
    session: AuthSession,
    query: web::Query<CourseIdQuery>,
    payload: web::Json<UpdateCourseRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_course_id(query.id.as_deref())?;
    let patch = CoursePatch::try_from(payload.into_inner())?;
    let course = state.courses.update_course(&id, patch).await?;
    tracing::info!(course_id = %id, username = %session.username(), "course updated");
    Ok(HttpResponse::Ok().json(DataResponse::new(course)))
}

/// Remove a course.
#[utoipa::path(
    delete,
    path = "/api/courses",
    params(CourseIdQuery),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponseSchema),
        (status = 400, description = "Missing or malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    session: AuthSession,
    query: web::Query<CourseIdQuery>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_course_id(query.id.as_deref())?;
    state.courses.delete_course(&id).await?;
    tracing::info!(course_id = %id, username = %session.username(), "course deleted");
    Ok(web::Json(MessageResponse::new("Course deleted successfully")))
}

/// Download the course brochure as an attachment.
#[utoipa::path(
    get,
    path = "/api/courses/{id}/download",
    params(("id" = String, Path, description = "Course identifier (UUID)")),
    responses(
        (
            status = 200,
            description = "Brochure bytes",
            headers(("Content-Disposition" = String, description = "attachment; filename=\"...\"")),
            content_type = "application/octet-stream"
        ),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Course or brochure not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "downloadBrochure"
)]
#[get("/courses/{id}/download")]
pub async fn download_brochure(
    state: web::Data<HttpState>,
    _session: AuthSession,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_course_id(Some(path.as_str()))?;
    let download = state.courses_query.brochure(&id).await?;
    let content_type = download
        .content_type
        .parse::<mime::Mime>()
        .unwrap_or(mime::APPLICATION_OCTET_STREAM);
    Ok(HttpResponse::Ok()
        .insert_header(ContentType(content_type))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(download.file_name)],
        })
        .body(download.bytes))
}

#[cfg(test)]
mod tests;
