//! Driving port for login and token authentication use-cases.
//!
//! Inbound adapters call this port to exchange credentials for a token and to
//! resolve a presented token back to a user, without importing the hashing
//! or signing infrastructure.

use async_trait::async_trait;

use crate::domain::{AuthToken, AuthenticatedUser, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a signed token.
    ///
    /// Unknown users and wrong passwords both surface as
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error>;

    /// Verify a presented token. Fails closed with `Unauthorized`.
    fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, Error>;
}
