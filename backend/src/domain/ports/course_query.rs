//! Driving port for course reads.

use async_trait::async_trait;

use crate::domain::{BrochureDownload, Course, CourseId, Error};

/// Domain use-case port for listing courses and serving brochures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// All courses, newest first. May be served from a short-lived cache.
    async fn list_courses(&self) -> Result<Vec<Course>, Error>;

    /// One course. `NotFound` for unknown ids.
    async fn get_course(&self, id: &CourseId) -> Result<Course, Error>;

    /// Decoded brochure for download.
    ///
    /// `NotFound` when the course is unknown or has no brochure.
    async fn brochure(&self, id: &CourseId) -> Result<BrochureDownload, Error>;
}
