//! Menu services implementing the menu driving ports.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{MenuCommand, MenuQuery, MenuRepository, MenuRepositoryError};
use crate::domain::{CategoryId, Error, GenreId, Menu, MenuDraft, MenuId};

/// Service implementing [`MenuCommand`] and [`MenuQuery`].
#[derive(Clone)]
pub struct MenuService<R> {
    menus: Arc<R>,
}

impl<R> MenuService<R> {
    /// Create a new service over `menus`.
    pub fn new(menus: Arc<R>) -> Self {
        Self { menus }
    }
}

fn map_menu_error(error: MenuRepositoryError) -> Error {
    match error {
        MenuRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("menu repository unavailable: {message}"))
        }
        MenuRepositoryError::Query { message } => {
            Error::internal(format!("menu repository error: {message}"))
        }
        MenuRepositoryError::MenuNotFound { menu_id } => {
            Error::not_found(format!("menu {menu_id} not found"))
        }
    }
}

#[async_trait]
impl<R> MenuCommand for MenuService<R>
where
    R: MenuRepository,
{
    async fn create_menu(&self, draft: MenuDraft) -> Result<Menu, Error> {
        self.menus
            .create_menu(&draft)
            .await
            .map_err(map_menu_error)
    }

    async fn update_menu(&self, id: MenuId, draft: MenuDraft) -> Result<Menu, Error> {
        self.menus
            .update_menu(id, &draft)
            .await
            .map_err(map_menu_error)
    }

    async fn update_genres(&self, id: MenuId, genre_ids: Vec<GenreId>) -> Result<Menu, Error> {
        self.menus
            .replace_genres(id, &genre_ids)
            .await
            .map_err(map_menu_error)
    }

    async fn update_categories(
        &self,
        id: MenuId,
        category_ids: Vec<CategoryId>,
    ) -> Result<Menu, Error> {
        self.menus
            .replace_categories(id, &category_ids)
            .await
            .map_err(map_menu_error)
    }

    async fn delete_menu(&self, id: MenuId) -> Result<(), Error> {
        self.menus.delete_menu(id).await.map_err(map_menu_error)
    }
}

#[async_trait]
impl<R> MenuQuery for MenuService<R>
where
    R: MenuRepository,
{
    async fn list_menus(&self) -> Result<Vec<Menu>, Error> {
        self.menus.list_menus().await.map_err(map_menu_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockMenuRepository;
    use crate::domain::{ErrorCode, MenuName};
    use rstest::rstest;

    fn make_service(repo: MockMenuRepository) -> MenuService<MockMenuRepository> {
        MenuService::new(Arc::new(repo))
    }

    fn draft() -> MenuDraft {
        MenuDraft {
            name: MenuName::new("Katsu curry").expect("fixture name"),
            genre_ids: vec![GenreId::new(1), GenreId::new(99)],
            category_ids: vec![CategoryId::new(2)],
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_the_narrowed_menu() {
        let mut repo = MockMenuRepository::new();
        repo.expect_create_menu()
            .times(1)
            .withf(|d| d.genre_ids == vec![GenreId::new(1), GenreId::new(99)])
            .return_once(|d| {
                Ok(Menu::new(MenuId::new(5), d.name.as_ref())
                    .with_genres([GenreId::new(1)])
                    .with_categories([CategoryId::new(2)]))
            });

        let menu = make_service(repo)
            .create_menu(draft())
            .await
            .expect("menu created");

        assert_eq!(menu.id, MenuId::new(5));
        assert_eq!(menu.genre_ids.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_genres_passes_requested_ids_through() {
        let mut repo = MockMenuRepository::new();
        repo.expect_replace_genres()
            .times(1)
            .withf(|id, ids| {
                *id == MenuId::new(3) && ids.to_vec() == vec![GenreId::new(2), GenreId::new(3)]
            })
            .return_once(|id, _| Ok(Menu::new(id, "Soba").with_genres([GenreId::new(2)])));

        let menu = make_service(repo)
            .update_genres(MenuId::new(3), vec![GenreId::new(2), GenreId::new(3)])
            .await
            .expect("genres replaced");

        assert_eq!(
            menu.genre_ids.into_iter().collect::<Vec<_>>(),
            vec![GenreId::new(2)]
        );
    }

    #[rstest]
    #[case(MenuRepositoryError::menu_not_found(4_i64), ErrorCode::NotFound)]
    #[case(MenuRepositoryError::connection("pool timed out"), ErrorCode::ServiceUnavailable)]
    #[case(MenuRepositoryError::query("deadlock"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn delete_maps_repository_failures(
        #[case] failure: MenuRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockMenuRepository::new();
        repo.expect_delete_menu()
            .times(1)
            .return_once(move |_| Err(failure));

        let err = make_service(repo)
            .delete_menu(MenuId::new(4))
            .await
            .expect_err("delete fails");

        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_menu_is_not_found() {
        let mut repo = MockMenuRepository::new();
        repo.expect_update_menu()
            .times(1)
            .return_once(|id, _| Err(MenuRepositoryError::menu_not_found(id.get())));

        let err = make_service(repo)
            .update_menu(MenuId::new(8), draft())
            .await
            .expect_err("missing menu");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "menu 8 not found");
    }

    #[rstest]
    #[tokio::test]
    async fn list_returns_repository_order() {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_menus().times(1).return_once(|| {
            Ok(vec![
                Menu::new(MenuId::new(1), "Udon"),
                Menu::new(MenuId::new(2), "Ramen"),
            ])
        });

        let menus = make_service(repo).list_menus().await.expect("menus listed");
        let ids: Vec<_> = menus.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
