//! Port abstraction for credential storage adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, Username};

use super::{StorageFailure, define_port_error};

define_port_error! {
    /// Persistence errors raised by credential repository adapters.
    pub enum CredentialRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "credential repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "credential repository query failed: {message}",
        /// A user with the same username or email already exists.
        Duplicate { field: String } => "a user with this {field} already exists",
    }
}

impl StorageFailure for CredentialRepositoryError {
    fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

/// Driven port for user records.
///
/// Usernames and emails are unique; `insert` reports collisions as
/// [`CredentialRepositoryError::Duplicate`] naming the offending field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Fetch a user by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, CredentialRepositoryError>;

    /// Insert a new user record.
    async fn insert(&self, user: &User) -> Result<(), CredentialRepositoryError>;

    /// List all users ordered by username.
    async fn list(&self) -> Result<Vec<User>, CredentialRepositoryError>;
}
