//! PostgreSQL-backed `CredentialRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CredentialRepository, CredentialRepositoryError};
use crate::domain::{PasswordHash, User, Username};

use super::error_mapping::{map_diesel_error, map_pool_error, unique_violation};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `CredentialRepository` port.
#[derive(Clone)]
pub struct DieselCredentialRepository {
    pool: DbPool,
}

impl DieselCredentialRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CredentialRepositoryError {
    map_pool_error(error, CredentialRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CredentialRepositoryError {
    if let Some(constraint) = unique_violation(&error) {
        let field = if constraint.contains("email") {
            "email"
        } else {
            "username"
        };
        return CredentialRepositoryError::duplicate(field);
    }
    map_diesel_error(
        error,
        CredentialRepositoryError::query,
        CredentialRepositoryError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, CredentialRepositoryError> {
    let username = Username::new(&row.username).map_err(|err| {
        CredentialRepositoryError::query(format!("stored username {:?}: {err}", row.username))
    })?;
    Ok(User {
        username,
        password_hash: PasswordHash::new(row.password_hash),
        email: row.email,
        name: row.name,
        created_at: row.created_at,
    })
}

#[async_trait]
impl CredentialRepository for DieselCredentialRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            username: user.username.as_ref(),
            password_hash: user.password_hash.as_ref(),
            email: user.email.as_str(),
            name: user.name.as_str(),
            created_at: user.created_at,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }
}
