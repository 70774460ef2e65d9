//! Driving port used by inbound adapters to authenticate a request.
//!
//! Adapters pass the raw `Authorization` header value (or `None` when it is
//! absent) and receive the resolved user. There is no anonymous fallback: a
//! failure is always an error.

use async_trait::async_trait;

use crate::domain::{Error, ResolvedUser};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestAuthenticator: Send + Sync {
    /// Verify the bearer token and resolve its subject to a user.
    async fn authenticate(&self, authorization: Option<String>) -> Result<ResolvedUser, Error>;
}
