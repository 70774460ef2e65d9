//! Driving port for menu reads.

use async_trait::async_trait;

use crate::domain::{Error, Menu};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuQuery: Send + Sync {
    /// Every menu with its genre and category sets, ordered by id.
    async fn list_menus(&self) -> Result<Vec<Menu>, Error>;
}
