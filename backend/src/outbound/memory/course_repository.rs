//! In-memory `CourseRepository`.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseId};

use super::{read, write};

/// Course store kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<Vec<Course>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut courses: Vec<Course> = read(&self.courses).iter().rev().cloned().collect();
        // Stable sort keeps reverse insertion order among equal timestamps.
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(courses)
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(read(&self.courses).iter().find(|c| c.id == *id).cloned())
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut courses = write(&self.courses);
        if courses.iter().any(|c| c.id == course.id) {
            return Err(CourseRepositoryError::query(format!(
                "course {} already exists",
                course.id
            )));
        }
        courses.push(course.clone());
        Ok(())
    }

    async fn replace(&self, course: &Course) -> Result<bool, CourseRepositoryError> {
        let mut courses = write(&self.courses);
        match courses.iter_mut().find(|c| c.id == course.id) {
            Some(slot) => {
                *slot = course.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut courses = write(&self.courses);
        let before = courses.len();
        courses.retain(|c| c.id != *id);
        Ok(courses.len() < before)
    }
}
