//! Driving port for administrative user writes.

use async_trait::async_trait;

use crate::domain::{Error, NewUserRequest, UserProfile};

/// Domain use-case port for creating users and seeding the default admin.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdminCommand: Send + Sync {
    /// Create a user. Duplicate usernames or emails yield `Conflict`.
    async fn create_user(&self, request: NewUserRequest) -> Result<UserProfile, Error>;

    /// Create the configured default admin if absent. Idempotent.
    async fn ensure_default_admin(&self) -> Result<(), Error>;
}
