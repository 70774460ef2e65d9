//! Driving port for favourite reads.

use async_trait::async_trait;

use crate::domain::{Error, FavoriteStatus, FavoriteWithMenu, MenuId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteQuery: Send + Sync {
    /// The user's favourites joined with their menus, newest first.
    async fn list_favorites(&self, user_id: UserId) -> Result<Vec<FavoriteWithMenu>, Error>;

    /// Favourite status of one menu for the user.
    async fn favorite_status(&self, user_id: UserId, menu_id: MenuId)
    -> Result<FavoriteStatus, Error>;
}
