//! Port for one-way password hashing.
use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing or verification could not run.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Hashes and verifies passwords.
///
/// Implementations are expected to be CPU-heavy and must not block the async
/// runtime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Returns `Ok(false)` for a mismatch; errors are reserved for malformed
    /// hashes or runtime failures.
    async fn verify(&self, password: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHasherError>;
}
