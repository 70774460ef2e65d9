//! Driving port mapping verified subjects to application users.

use async_trait::async_trait;

use crate::domain::{Error, ResolvedUser, Subject};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserIdentity: Send + Sync {
    /// Return the user for `subject`, creating it on first sight.
    ///
    /// `is_new` is true only for the call that inserted the row; racing
    /// callers observe the winner's row with `is_new == false`.
    async fn resolve_or_create(&self, subject: &Subject) -> Result<ResolvedUser, Error>;
}
