//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! The primary storage backend. Repository implementations only translate
//! between Diesel rows and domain types; row structs (`models.rs`) and table
//! definitions (`schema.rs`) never leave this module.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalogue")).await?;
//! let courses = DieselCourseRepository::new(pool);
//! # let _ = courses;
//! # Ok(())
//! # }
//! ```

mod diesel_course_repository;
mod diesel_credential_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_credential_repository::DieselCredentialRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
