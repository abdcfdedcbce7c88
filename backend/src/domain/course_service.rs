//! Course catalogue service.
//!
//! Implements [`CourseCommand`] and [`CourseQuery`] over a course repository.
//! Listings go through a [`CourseListCache`]; every successful write clears
//! it before returning so the next read observes the change.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{CourseCommand, CourseQuery, CourseRepository, CourseRepositoryError};
use crate::domain::{
    BrochureDownload, CacheLookup, Course, CourseDraft, CourseId, CourseListCache, CoursePatch,
    Error,
};

pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const NO_BROCHURE: &str = "No brochure available";

/// Catalogue service implementing the course driving ports.
pub struct CourseCatalogueService<R> {
    courses: Arc<R>,
    clock: Arc<dyn Clock>,
    cache: CourseListCache,
}

impl<R> CourseCatalogueService<R> {
    /// Create a service whose listing cache stays fresh for `cache_ttl`.
    pub fn new(courses: Arc<R>, clock: Arc<dyn Clock>, cache_ttl: Duration) -> Self {
        Self {
            courses,
            clock,
            cache: CourseListCache::new(cache_ttl),
        }
    }
}

impl<R> CourseCatalogueService<R>
where
    R: CourseRepository,
{
    fn map_repository_error(error: CourseRepositoryError) -> Error {
        Error::internal(format!("course store error: {error}"))
    }

    async fn find(&self, id: &CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(COURSE_NOT_FOUND))
    }
}

#[async_trait]
impl<R> CourseQuery for CourseCatalogueService<R>
where
    R: CourseRepository,
{
    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        let token = match self.cache.get(self.clock.utc()) {
            CacheLookup::Hit(courses) => return Ok(courses),
            CacheLookup::Miss(token) => token,
        };
        let courses = self
            .courses
            .list()
            .await
            .map_err(Self::map_repository_error)?;
        self.cache.put(token, courses.clone());
        Ok(courses)
    }

    async fn get_course(&self, id: &CourseId) -> Result<Course, Error> {
        self.find(id).await
    }

    async fn brochure(&self, id: &CourseId) -> Result<BrochureDownload, Error> {
        let course = self.find(id).await?;
        let (bytes, content_type) = course
            .brochure()
            .into_content()
            .ok_or_else(|| Error::not_found(NO_BROCHURE))?;
        Ok(BrochureDownload {
            file_name: course.brochure_file_name,
            content_type,
            bytes,
        })
    }
}

#[async_trait]
impl<R> CourseCommand for CourseCatalogueService<R>
where
    R: CourseRepository,
{
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error> {
        let course = draft.into_course(CourseId::random(), self.clock.utc());
        self.courses
            .insert(&course)
            .await
            .map_err(Self::map_repository_error)?;
        self.cache.invalidate();
        Ok(course)
    }

    async fn update_course(&self, id: &CourseId, patch: CoursePatch) -> Result<Course, Error> {
        let mut course = self.find(id).await?;
        patch.apply(&mut course, self.clock.utc());
        let replaced = self
            .courses
            .replace(&course)
            .await
            .map_err(Self::map_repository_error)?;
        if !replaced {
            return Err(Error::not_found(COURSE_NOT_FOUND));
        }
        self.cache.invalidate();
        Ok(course)
    }

    async fn delete_course(&self, id: &CourseId) -> Result<(), Error> {
        let deleted = self
            .courses
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(COURSE_NOT_FOUND));
        }
        self.cache.invalidate();
        Ok(())
    }
}
