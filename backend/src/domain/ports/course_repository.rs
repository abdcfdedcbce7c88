//! Port abstraction for course storage adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Course, CourseId};

use super::{StorageFailure, define_port_error};

define_port_error! {
    /// Persistence errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}",
    }
}

impl StorageFailure for CourseRepositoryError {
    fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

/// Driven port for course records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses, newest first. Ties keep insertion order, newest first.
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError>;

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Overwrite an existing record. Returns `false` when the id is absent.
    async fn replace(&self, course: &Course) -> Result<bool, CourseRepositoryError>;

    /// Remove a record. Returns `false` when the id is absent.
    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError>;
}
