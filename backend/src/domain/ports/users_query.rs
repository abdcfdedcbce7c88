//! Driving port for user-facing queries.

use async_trait::async_trait;

use crate::domain::{Error, UserProfile, Username};

/// Domain use-case port for reading user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users ordered by username.
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error>;

    /// Profile for the authenticated user. `NotFound` when the record is gone.
    async fn current_user(&self, username: &Username) -> Result<UserProfile, Error>;
}
