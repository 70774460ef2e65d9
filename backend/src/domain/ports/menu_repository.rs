//! Port for menu persistence and its association sets.
//!
//! Every mutating method runs in a single transaction inside the adapter.
//! Requested genre and category identifiers are resolved against the
//! reference tables; identifiers with no matching row are dropped.

use async_trait::async_trait;

use crate::domain::{CategoryId, GenreId, Menu, MenuDraft, MenuId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by menu repository adapters.
    pub enum MenuRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "menu repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "menu repository query failed: {message}",
        /// The addressed menu does not exist.
        MenuNotFound { menu_id: i64 } => "menu {menu_id} not found",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// All menus ordered by identifier, association sets loaded.
    async fn list_menus(&self) -> Result<Vec<Menu>, MenuRepositoryError>;

    /// Insert a menu and the resolvable subset of its associations.
    async fn create_menu(&self, draft: &MenuDraft) -> Result<Menu, MenuRepositoryError>;

    /// Rename a menu and replace both association sets.
    async fn update_menu(&self, id: MenuId, draft: &MenuDraft)
    -> Result<Menu, MenuRepositoryError>;

    /// Replace the genre set, leaving categories untouched.
    async fn replace_genres(
        &self,
        id: MenuId,
        genre_ids: &[GenreId],
    ) -> Result<Menu, MenuRepositoryError>;

    /// Replace the category set, leaving genres untouched.
    async fn replace_categories(
        &self,
        id: MenuId,
        category_ids: &[CategoryId],
    ) -> Result<Menu, MenuRepositoryError>;

    /// Delete a menu together with its associations and the favourites
    /// pointing at it.
    async fn delete_menu(&self, id: MenuId) -> Result<(), MenuRepositoryError>;
}
