//! Driving port for menu mutations.
//!
//! Inbound adapters hand over validated input; the service maps storage
//! failures into domain [`Error`] values.

use async_trait::async_trait;

use crate::domain::{CategoryId, Error, GenreId, Menu, MenuDraft, MenuId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuCommand: Send + Sync {
    /// Create a menu; unknown genre/category identifiers are dropped.
    async fn create_menu(&self, draft: MenuDraft) -> Result<Menu, Error>;

    /// Rename a menu and replace both association sets.
    async fn update_menu(&self, id: MenuId, draft: MenuDraft) -> Result<Menu, Error>;

    /// Replace the genre set only.
    async fn update_genres(&self, id: MenuId, genre_ids: Vec<GenreId>) -> Result<Menu, Error>;

    /// Replace the category set only.
    async fn update_categories(
        &self,
        id: MenuId,
        category_ids: Vec<CategoryId>,
    ) -> Result<Menu, Error>;

    /// Delete a menu and everything that references it.
    async fn delete_menu(&self, id: MenuId) -> Result<(), Error>;
}
