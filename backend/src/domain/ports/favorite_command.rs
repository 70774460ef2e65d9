//! Driving port for favourite mutations on behalf of an authenticated user.

use async_trait::async_trait;

use crate::domain::{Error, Favorite, FavoriteId, MenuId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteCommand: Send + Sync {
    /// Favourite a menu. Conflict when already present, not found when the
    /// menu is missing.
    async fn add_favorite(&self, user_id: UserId, menu_id: MenuId) -> Result<Favorite, Error>;

    /// Remove the favourite for a menu.
    async fn remove_favorite(&self, user_id: UserId, menu_id: MenuId) -> Result<(), Error>;

    /// Remove a favourite by id. Forbidden when `user_id` does not own it.
    async fn remove_favorite_by_id(
        &self,
        user_id: UserId,
        favorite_id: FavoriteId,
    ) -> Result<(), Error>;
}
