//! bcrypt implementation of the `PasswordHasher` port.
//!
//! Hashing and verification run on the blocking thread pool.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// bcrypt hasher with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: ::bcrypt::DEFAULT_COST,
        }
    }
}

impl BcryptPasswordHasher {
    /// Use a specific cost. Values below bcrypt's minimum fail at hash time.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

fn join_error(error: tokio::task::JoinError) -> PasswordHasherError {
    PasswordHasherError::hashing(format!("hashing task failed: {error}"))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || ::bcrypt::hash(password.as_bytes(), cost))
            .await
            .map_err(join_error)?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.as_ref().to_owned();
        tokio::task::spawn_blocking(move || ::bcrypt::verify(password.as_bytes(), &hash))
            .await
            .map_err(join_error)?
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }
}
