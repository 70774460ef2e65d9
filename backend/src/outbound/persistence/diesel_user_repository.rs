//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Users are keyed by the identity provider's subject. The unique index on
//! `auth0_sub` arbitrates concurrent first requests from the same subject;
//! the losing insert surfaces as `DuplicateSubject` and the identity service
//! re-reads the winner's row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Subject, User, UserId};

use super::diesel_helpers::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let subject = Subject::new(row.auth0_sub).map_err(|err| {
        UserRepositoryError::query(format!("stored subject is invalid: {err}"))
    })?;
    Ok(User {
        id: UserId::new(row.user_id),
        subject,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_subject(
        &self,
        subject: &Subject,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::auth0_sub.eq(subject.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, subject: &Subject) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(&NewUserRow {
                auth0_sub: subject.as_ref(),
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    UserRepositoryError::duplicate_subject(subject.as_ref())
                } else {
                    map_diesel_error(error)
                }
            })?;

        row_to_user(row)
    }
}
