//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Subject, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another row already holds this subject.
        DuplicateSubject { subject: String } => "user with subject {subject} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by external subject.
    async fn find_by_subject(&self, subject: &Subject)
    -> Result<Option<User>, UserRepositoryError>;

    /// Insert a user for `subject`, returning the stored row.
    ///
    /// Fails with [`UserRepositoryError::DuplicateSubject`] when the unique
    /// subject constraint rejects the insert.
    async fn insert(&self, subject: &Subject) -> Result<User, UserRepositoryError>;
}
