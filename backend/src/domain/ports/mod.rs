//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are called by
//! inbound adapters. Driven ports (`*Repository`, [`PasswordHasher`],
//! [`TokenCodec`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod course_command;
mod course_query;
mod course_repository;
mod credential_repository;
mod login_service;
mod password_hasher;
mod token_codec;
mod user_admin_command;
mod users_query;

pub use course_command::CourseCommand;
#[cfg(test)]
pub use course_command::MockCourseCommand;
pub use course_query::CourseQuery;
#[cfg(test)]
pub use course_query::MockCourseQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
pub use credential_repository::{CredentialRepository, CredentialRepositoryError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenCodecError};
#[cfg(test)]
pub use user_admin_command::MockUserAdminCommand;
pub use user_admin_command::UserAdminCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

/// Classification shared by storage port errors.
///
/// Fallback-switching adapters use it to tell an unreachable backend apart
/// from a failing query.
pub trait StorageFailure {
    fn is_connection(&self) -> bool;
}
