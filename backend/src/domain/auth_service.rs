//! Authentication and user administration service.
//!
//! Implements the [`LoginService`], [`UsersQuery`], and [`UserAdminCommand`]
//! driving ports over a credential repository, a password hasher, and a
//! token codec.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialRepository, CredentialRepositoryError, LoginService, PasswordHasher,
    PasswordHasherError, TokenCodec, UserAdminCommand, UsersQuery,
};
use crate::domain::{
    AuthToken, AuthenticatedUser, CredentialRejection, Error, LoginCredentials, NewUserRequest,
    PasswordHash, TIMESTAMP_PRECISION, User, UserProfile, Username,
};

/// Identity seeded at startup and by the init endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct DefaultAdmin {
    pub username: Username,
    pub password: Zeroizing<String>,
    pub email: String,
    pub name: String,
}

impl fmt::Debug for DefaultAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultAdmin")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Outcome of a failed credential check.
#[derive(Debug)]
pub enum LoginError {
    /// The credentials do not match a stored user.
    Rejected(CredentialRejection),
    /// The check could not be completed.
    Failed(Error),
}

impl From<Error> for LoginError {
    fn from(value: Error) -> Self {
        Self::Failed(value)
    }
}

/// Authentication service implementing the user-facing driving ports.
#[derive(Clone)]
pub struct AuthService<R, H> {
    credentials: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
    default_admin: DefaultAdmin,
}

impl<R, H> AuthService<R, H> {
    pub fn new(
        credentials: Arc<R>,
        hasher: Arc<H>,
        tokens: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
        default_admin: DefaultAdmin,
    ) -> Self {
        Self {
            credentials,
            hasher,
            tokens,
            clock,
            default_admin,
        }
    }
}

impl<R, H> AuthService<R, H>
where
    R: CredentialRepository,
    H: PasswordHasher,
{
    fn map_repository_error(error: CredentialRepositoryError) -> Error {
        match error {
            CredentialRepositoryError::Duplicate { field } => {
                Error::conflict(format!("a user with this {field} already exists"))
                    .with_details(json!({ "field": field, "code": "duplicate_user" }))
            }
            other => Error::internal(format!("credential store error: {other}")),
        }
    }

    fn map_hasher_error(error: PasswordHasherError) -> Error {
        Error::internal(error.to_string())
    }

    /// Check credentials and issue a token, keeping the rejection reason.
    pub async fn verify_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthToken, LoginError> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(LoginError::Rejected(CredentialRejection::UserNotFound));
        };
        let user = self
            .credentials
            .find_by_username(&username)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or(LoginError::Rejected(CredentialRejection::UserNotFound))?;
        let matches = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .await
            .map_err(Self::map_hasher_error)?;
        if !matches {
            return Err(LoginError::Rejected(CredentialRejection::InvalidPassword));
        }
        self.tokens
            .issue(&user.username, self.clock.utc())
            .map_err(|err| LoginError::Failed(Error::internal(err.to_string())))
    }

    /// Hash a plaintext password.
    pub async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        self.hasher
            .hash(password)
            .await
            .map_err(Self::map_hasher_error)
    }

    /// Hash the password and stamp a new, not yet stored, user record.
    async fn new_user(
        &self,
        username: Username,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<User, Error> {
        let password_hash = self.hash_password(password).await?;
        Ok(User {
            username,
            password_hash,
            email: email.to_owned(),
            name: name.to_owned(),
            created_at: self.clock.utc().trunc_subsecs(TIMESTAMP_PRECISION),
        })
    }
}

#[async_trait]
impl<R, H> LoginService for AuthService<R, H>
where
    R: CredentialRepository,
    H: PasswordHasher,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        match self.verify_credentials(credentials).await {
            Ok(token) => Ok(token),
            Err(LoginError::Rejected(reason)) => {
                debug!(username = credentials.username(), %reason, "login rejected");
                Err(Error::unauthorized("invalid credentials"))
            }
            Err(LoginError::Failed(error)) => Err(error),
        }
    }

    fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, Error> {
        self.tokens
            .verify(token, self.clock.utc())
            .map(|username| AuthenticatedUser { username })
            .map_err(|err| {
                debug!(error = %err, "token rejected");
                Error::unauthorized("Unauthorized")
            })
    }
}

#[async_trait]
impl<R, H> UsersQuery for AuthService<R, H>
where
    R: CredentialRepository,
    H: PasswordHasher,
{
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error> {
        let users = self
            .credentials
            .list()
            .await
            .map_err(Self::map_repository_error)?;
        Ok(users.iter().map(User::profile).collect())
    }

    async fn current_user(&self, username: &Username) -> Result<UserProfile, Error> {
        self.credentials
            .find_by_username(username)
            .await
            .map_err(Self::map_repository_error)?
            .map(|user| user.profile())
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[async_trait]
impl<R, H> UserAdminCommand for AuthService<R, H>
where
    R: CredentialRepository,
    H: PasswordHasher,
{
    async fn create_user(&self, request: NewUserRequest) -> Result<UserProfile, Error> {
        let user = self
            .new_user(
                request.username().clone(),
                request.email(),
                request.name(),
                request.password(),
            )
            .await?;
        self.credentials
            .insert(&user)
            .await
            .map_err(Self::map_repository_error)?;
        info!(username = %user.username, "user created");
        Ok(user.profile())
    }

    async fn ensure_default_admin(&self) -> Result<(), Error> {
        let admin = &self.default_admin;
        let existing = self
            .credentials
            .find_by_username(&admin.username)
            .await
            .map_err(Self::map_repository_error)?;
        if existing.is_some() {
            return Ok(());
        }
        let user = self
            .new_user(
                admin.username.clone(),
                &admin.email,
                &admin.name,
                &admin.password,
            )
            .await?;
        match self.credentials.insert(&user).await {
            Ok(()) => {
                info!(username = %user.username, "default admin created");
                Ok(())
            }
            // A concurrent seed won the race.
            Err(CredentialRepositoryError::Duplicate { .. }) => Ok(()),
            Err(other) => Err(Self::map_repository_error(other)),
        }
    }
}
