//! Favourite services implementing the favourite driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    FavoriteCommand, FavoriteQuery, FavoriteRepository, FavoriteRepositoryError,
};
use crate::domain::{
    Error, Favorite, FavoriteId, FavoriteStatus, FavoriteWithMenu, MenuId, UserId,
};

/// Service implementing [`FavoriteCommand`] and [`FavoriteQuery`].
#[derive(Clone)]
pub struct FavoriteService<R> {
    favorites: Arc<R>,
}

impl<R> FavoriteService<R> {
    /// Create a new service over `favorites`.
    pub fn new(favorites: Arc<R>) -> Self {
        Self { favorites }
    }
}

fn map_favorite_error(error: FavoriteRepositoryError) -> Error {
    match error {
        FavoriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorite repository unavailable: {message}"))
        }
        FavoriteRepositoryError::Query { message } => {
            Error::internal(format!("favorite repository error: {message}"))
        }
        FavoriteRepositoryError::DuplicateFavorite { menu_id, .. } => {
            Error::conflict("menu is already a favorite").with_details(json!({
                "menu_id": menu_id,
                "code": "duplicate_favorite",
            }))
        }
        FavoriteRepositoryError::MenuNotFound { menu_id } => {
            Error::not_found(format!("menu {menu_id} not found"))
        }
        FavoriteRepositoryError::FavoriteNotFound => Error::not_found("favorite not found"),
        FavoriteRepositoryError::NotOwner { .. } => {
            Error::forbidden("favorite belongs to another user")
        }
    }
}

#[async_trait]
impl<R> FavoriteCommand for FavoriteService<R>
where
    R: FavoriteRepository,
{
    async fn add_favorite(&self, user_id: UserId, menu_id: MenuId) -> Result<Favorite, Error> {
        self.favorites
            .add_favorite(user_id, menu_id)
            .await
            .map_err(map_favorite_error)
    }

    async fn remove_favorite(&self, user_id: UserId, menu_id: MenuId) -> Result<(), Error> {
        self.favorites
            .remove_favorite(user_id, menu_id)
            .await
            .map_err(map_favorite_error)
    }

    async fn remove_favorite_by_id(
        &self,
        user_id: UserId,
        favorite_id: FavoriteId,
    ) -> Result<(), Error> {
        self.favorites
            .remove_favorite_by_id(favorite_id, user_id)
            .await
            .map_err(map_favorite_error)
    }
}

#[async_trait]
impl<R> FavoriteQuery for FavoriteService<R>
where
    R: FavoriteRepository,
{
    async fn list_favorites(&self, user_id: UserId) -> Result<Vec<FavoriteWithMenu>, Error> {
        self.favorites
            .list_favorites(user_id)
            .await
            .map_err(map_favorite_error)
    }

    async fn favorite_status(
        &self,
        user_id: UserId,
        menu_id: MenuId,
    ) -> Result<FavoriteStatus, Error> {
        self.favorites
            .favorite_status(user_id, menu_id)
            .await
            .map_err(map_favorite_error)
    }
}

#[cfg(test)]
#[path = "favorite_service_tests.rs"]
mod tests;
