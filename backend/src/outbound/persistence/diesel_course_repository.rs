//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CourseRow, CourseUpdate, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel-backed implementation of the `CourseRepository` port.
///
/// Listing orders by `created_at` then the insertion counter, both
/// descending.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CourseRepositoryError {
    map_pool_error(error, CourseRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

fn row_to_course(row: CourseRow) -> Course {
    Course {
        id: CourseId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        duration: row.duration,
        image_data: row.image_data,
        image_file_name: row.image_file_name,
        brochure_data: row.brochure_data,
        brochure_file_name: row.brochure_file_name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<CourseRow> = courses::table
            .order((courses::created_at.desc(), courses::seq.desc()))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_course).collect())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = courses::table
            .find(*id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(row_to_course))
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewCourseRow {
            id: *course.id.as_uuid(),
            name: &course.name,
            description: &course.description,
            duration: &course.duration,
            image_data: &course.image_data,
            image_file_name: &course.image_file_name,
            brochure_data: &course.brochure_data,
            brochure_file_name: &course.brochure_file_name,
            created_at: course.created_at,
            updated_at: course.updated_at,
        };
        diesel::insert_into(courses::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn replace(&self, course: &Course) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = CourseUpdate {
            name: &course.name,
            description: &course.description,
            duration: &course.duration,
            image_data: &course.image_data,
            image_file_name: &course.image_file_name,
            brochure_data: &course.brochure_data,
            brochure_file_name: &course.brochure_file_name,
            updated_at: course.updated_at,
        };
        let updated = diesel::update(courses::table.find(*course.id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(courses::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}
