//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{courses, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: &'a str,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the courses table.
///
/// `seq` is only used for ordering and is not selected.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub image_data: String,
    pub image_file_name: String,
    pub brochure_data: String,
    pub brochure_file_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating course records. `seq` is assigned by the
/// database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub duration: &'a str,
    pub image_data: &'a str,
    pub image_file_name: &'a str,
    pub brochure_data: &'a str,
    pub brochure_file_name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for overwriting the mutable course columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
pub(crate) struct CourseUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub duration: &'a str,
    pub image_data: &'a str,
    pub image_file_name: &'a str,
    pub brochure_data: &'a str,
    pub brochure_file_name: &'a str,
    pub updated_at: DateTime<Utc>,
}
