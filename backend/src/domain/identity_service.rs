//! Identity resolution: verified subject to application user.
//!
//! Users are created lazily the first time a subject authenticates. The
//! unique subject constraint is the only guard against concurrent first
//! logins; the losing insert re-reads the winner's row.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{UserIdentity, UserRepository, UserRepositoryError};
use crate::domain::{Error, ResolvedUser, Subject};

/// Service implementing [`UserIdentity`] on top of a [`UserRepository`].
#[derive(Clone)]
pub struct IdentityService<R> {
    users: Arc<R>,
}

impl<R> IdentityService<R> {
    /// Create a new service over `users`.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateSubject { subject } => {
            Error::conflict(format!("user with subject {subject} already exists"))
        }
    }
}

impl<R> IdentityService<R>
where
    R: UserRepository,
{
    async fn find(&self, subject: &Subject) -> Result<Option<crate::domain::User>, Error> {
        self.users
            .find_by_subject(subject)
            .await
            .map_err(map_user_error)
    }
}

#[async_trait]
impl<R> UserIdentity for IdentityService<R>
where
    R: UserRepository,
{
    async fn resolve_or_create(&self, subject: &Subject) -> Result<ResolvedUser, Error> {
        if let Some(user) = self.find(subject).await? {
            return Ok(ResolvedUser {
                user,
                is_new: false,
            });
        }

        match self.users.insert(subject).await {
            Ok(user) => {
                info!(user_id = %user.id, "created user on first authentication");
                Ok(ResolvedUser { user, is_new: true })
            }
            Err(err @ UserRepositoryError::DuplicateSubject { .. }) => {
                debug!("lost user insert race; re-reading winner");
                match self.find(subject).await? {
                    Some(user) => Ok(ResolvedUser {
                        user,
                        is_new: false,
                    }),
                    None => Err(map_user_error(err)),
                }
            }
            Err(err) => Err(map_user_error(err)),
        }
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
