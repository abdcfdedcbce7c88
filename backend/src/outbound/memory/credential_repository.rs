//! In-memory `CredentialRepository`.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{CredentialRepository, CredentialRepositoryError};
use crate::domain::{User, Username};

use super::{read, write};

/// Credential store keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryCredentialRepository {
    users: RwLock<BTreeMap<Username, User>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, CredentialRepositoryError> {
        Ok(read(&self.users).get(username).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), CredentialRepositoryError> {
        let mut users = write(&self.users);
        if users.contains_key(&user.username) {
            return Err(CredentialRepositoryError::duplicate("username"));
        }
        if users.values().any(|existing| existing.email == user.email) {
            return Err(CredentialRepositoryError::duplicate("email"));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, CredentialRepositoryError> {
        Ok(read(&self.users).values().cloned().collect())
    }
}
