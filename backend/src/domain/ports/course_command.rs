//! Driving port for course writes.

use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId, CoursePatch, Error};

/// Domain use-case port for creating, changing, and removing courses.
///
/// Every successful call invalidates cached listings before returning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Store a new course with a generated id and equal timestamps.
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error>;

    /// Merge `patch` into the course. `NotFound` for unknown ids.
    async fn update_course(&self, id: &CourseId, patch: CoursePatch) -> Result<Course, Error>;

    /// Remove the course. `NotFound` for unknown ids.
    async fn delete_course(&self, id: &CourseId) -> Result<(), Error>;
}
