//! Fallback-switching `CredentialRepository`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CredentialRepository, CredentialRepositoryError};
use crate::domain::{BackendStatus, User, Username};
use crate::outbound::memory::InMemoryCredentialRepository;

use super::route_call;

/// Credential repository that degrades from `P` to memory.
pub struct FallbackCredentialRepository<P> {
    primary: Arc<P>,
    memory: Arc<InMemoryCredentialRepository>,
    status: Arc<BackendStatus>,
}

impl<P> FallbackCredentialRepository<P> {
    pub fn new(
        primary: Arc<P>,
        memory: Arc<InMemoryCredentialRepository>,
        status: Arc<BackendStatus>,
    ) -> Self {
        Self {
            primary,
            memory,
            status,
        }
    }
}

#[async_trait]
impl<P> CredentialRepository for FallbackCredentialRepository<P>
where
    P: CredentialRepository,
{
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, CredentialRepositoryError> {
        route_call!(self, find_by_username(username))
    }

    async fn insert(&self, user: &User) -> Result<(), CredentialRepositoryError> {
        route_call!(self, insert(user))
    }

    async fn list(&self) -> Result<Vec<User>, CredentialRepositoryError> {
        route_call!(self, list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    use crate::domain::ports::MockCredentialRepository;
    use crate::domain::{BackendMode, PasswordHash};

    fn admin() -> User {
        User {
            username: Username::new("admin").expect("valid username"),
            password_hash: PasswordHash::new("hash"),
            email: "admin@miscareer.com".into(),
            name: "Admin User".into(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_memory_serves_logins_after_switch() {
        let mut primary = MockCredentialRepository::new();
        primary
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(CredentialRepositoryError::connection("refused")));
        let memory = Arc::new(InMemoryCredentialRepository::new());
        memory.insert(&admin()).await.expect("seed memory");
        let status = Arc::new(BackendStatus::new(BackendMode::Primary));
        let repo =
            FallbackCredentialRepository::new(Arc::new(primary), memory, Arc::clone(&status));

        let username = Username::new("admin").expect("valid username");
        let first = repo.find_by_username(&username).await.expect("served");
        let second = repo.find_by_username(&username).await.expect("served");

        assert!(first.is_some() && second.is_some());
        assert_eq!(status.mode(), BackendMode::Fallback);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicates_from_primary_do_not_switch() {
        let mut primary = MockCredentialRepository::new();
        primary
            .expect_insert()
            .returning(|_| Err(CredentialRepositoryError::duplicate("email")));
        let status = Arc::new(BackendStatus::new(BackendMode::Primary));
        let repo = FallbackCredentialRepository::new(
            Arc::new(primary),
            Arc::new(InMemoryCredentialRepository::new()),
            Arc::clone(&status),
        );

        let error = repo.insert(&admin()).await.expect_err("duplicate");
        assert_eq!(error, CredentialRepositoryError::duplicate("email"));
        assert_eq!(status.mode(), BackendMode::Primary);
    }
}
