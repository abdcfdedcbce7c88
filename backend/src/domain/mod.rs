//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed entities of the course catalogue and
//! the services that operate on them. Types here stay free of HTTP and
//! database concerns; adapters in `inbound` and `outbound` translate.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / Username / UserProfile: credential store records.
//! - Course / CourseId / CourseDraft / CoursePatch: catalogue records.
//! - BrochurePayload / BrochureDownload: brochure classification.
//! - AuthService / CourseCatalogueService: driving-port implementations.
//! - BackendStatus: which storage backend is serving requests.

pub mod auth;
pub mod auth_service;
pub mod backend_status;
pub mod brochure;
pub mod course;
pub mod course_service;
pub mod error;
pub mod list_cache;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthToken, AuthenticatedUser, CredentialRejection, LoginCredentials, LoginValidationError,
};
pub use self::auth_service::{AuthService, DefaultAdmin, LoginError};
pub use self::backend_status::{BackendMode, BackendStatus};
pub use self::brochure::{BrochureDownload, BrochurePayload};
pub use self::course::{
    Course, CourseDraft, CourseId, CoursePatch, CourseValidationError,
    DEFAULT_BROCHURE_FILE_NAME, DEFAULT_DURATION, TIMESTAMP_PRECISION,
};
pub use self::course_service::CourseCatalogueService;
pub use self::error::{Error, ErrorCode};
pub use self::list_cache::{CacheLookup, CourseListCache, FillToken};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUserRequest, PasswordHash, User, UserProfile, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Unauthorized"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
