//! Port for favourite persistence.

use async_trait::async_trait;

use crate::domain::{Favorite, FavoriteId, FavoriteStatus, FavoriteWithMenu, MenuId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by favourite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "favorite repository query failed: {message}",
        /// The `(user, menu)` pair is already a favourite.
        DuplicateFavorite { user_id: i64, menu_id: i64 } =>
            "menu {menu_id} is already a favorite of user {user_id}",
        /// The referenced menu does not exist.
        MenuNotFound { menu_id: i64 } => "menu {menu_id} not found",
        /// No favourite matched.
        FavoriteNotFound => "favorite not found",
        /// The favourite belongs to a different user.
        NotOwner { favorite_id: i64 } => "favorite {favorite_id} belongs to another user",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Record `menu_id` as a favourite of `user_id`.
    ///
    /// Checks for an existing pair before checking the menu, so a duplicate
    /// of a since-deleted menu still reports
    /// [`FavoriteRepositoryError::DuplicateFavorite`].
    async fn add_favorite(
        &self,
        user_id: UserId,
        menu_id: MenuId,
    ) -> Result<Favorite, FavoriteRepositoryError>;

    /// Remove the favourite for `(user_id, menu_id)`.
    async fn remove_favorite(
        &self,
        user_id: UserId,
        menu_id: MenuId,
    ) -> Result<(), FavoriteRepositoryError>;

    /// Remove a favourite by identifier after checking it belongs to
    /// `owner`. A foreign favourite is left in place.
    async fn remove_favorite_by_id(
        &self,
        favorite_id: FavoriteId,
        owner: UserId,
    ) -> Result<(), FavoriteRepositoryError>;

    /// Favourites of `user_id` whose menu still exists, newest first.
    async fn list_favorites(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FavoriteWithMenu>, FavoriteRepositoryError>;

    /// Whether `user_id` has favourited `menu_id`.
    async fn favorite_status(
        &self,
        user_id: UserId,
        menu_id: MenuId,
    ) -> Result<FavoriteStatus, FavoriteRepositoryError>;
}
