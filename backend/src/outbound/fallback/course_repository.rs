//! Fallback-switching `CourseRepository`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{BackendStatus, Course, CourseId};
use crate::outbound::memory::InMemoryCourseRepository;

use super::route_call;

/// Course repository that degrades from `P` to memory.
pub struct FallbackCourseRepository<P> {
    primary: Arc<P>,
    memory: Arc<InMemoryCourseRepository>,
    status: Arc<BackendStatus>,
}

impl<P> FallbackCourseRepository<P> {
    pub fn new(
        primary: Arc<P>,
        memory: Arc<InMemoryCourseRepository>,
        status: Arc<BackendStatus>,
    ) -> Self {
        Self {
            primary,
            memory,
            status,
        }
    }
}

#[async_trait]
impl<P> CourseRepository for FallbackCourseRepository<P>
where
    P: CourseRepository,
{
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        route_call!(self, list())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        route_call!(self, find_by_id(id))
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        route_call!(self, insert(course))
    }

    async fn replace(&self, course: &Course) -> Result<bool, CourseRepositoryError> {
        route_call!(self, replace(course))
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        route_call!(self, delete(id))
    }
}
