//! PostgreSQL-backed `MenuRepository` implementation using Diesel ORM.
//!
//! Every write runs in one transaction. The target menu row is locked with
//! `SELECT ... FOR UPDATE` before its association sets are replaced, so two
//! concurrent replacements of the same menu serialise rather than interleave.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::info;

use crate::domain::ports::{MenuRepository, MenuRepositoryError};
use crate::domain::{CategoryId, GenreId, Menu, MenuDraft, MenuId};

use super::diesel_helpers::{TxError, map_diesel_error, map_pool_error};
use super::models::{MenuCategoryRow, MenuGenreRow, MenuRow, MenuUpdate, NewMenuRow};
use super::pool::DbPool;
use super::schema::{
    eating_category_list, eating_genre_list, favorites, menu_category_relation,
    menu_genre_relation, menu_list,
};

type MenuTxError = TxError<MenuRepositoryError>;

/// Diesel-backed implementation of the `MenuRepository` port.
#[derive(Clone)]
pub struct DieselMenuRepository {
    pool: DbPool,
}

impl DieselMenuRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use menu_backend::outbound::persistence::{DbPool, DieselMenuRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/menus")).await?;
    /// let repository = DieselMenuRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Association sets keyed by raw menu id.
#[derive(Debug, Default)]
pub(super) struct Associations {
    genres: HashMap<i64, BTreeSet<GenreId>>,
    categories: HashMap<i64, BTreeSet<CategoryId>>,
}

impl Associations {
    /// Build the domain menu for `row`, consuming its association sets.
    pub(super) fn attach(&mut self, row: MenuRow) -> Menu {
        let genres = self.genres.remove(&row.menu_id).unwrap_or_default();
        let categories = self.categories.remove(&row.menu_id).unwrap_or_default();
        Menu::new(MenuId::new(row.menu_id), row.menu_name)
            .with_genres(genres)
            .with_categories(categories)
    }
}

/// Load the genre and category sets of `menu_ids`, one query per table.
pub(super) async fn load_associations(
    conn: &mut AsyncPgConnection,
    menu_ids: &[i64],
) -> QueryResult<Associations> {
    let mut associations = Associations::default();
    if menu_ids.is_empty() {
        return Ok(associations);
    }

    let genre_rows: Vec<MenuGenreRow> = menu_genre_relation::table
        .filter(menu_genre_relation::menu_id.eq_any(menu_ids.to_vec()))
        .select(MenuGenreRow::as_select())
        .load(conn)
        .await?;
    for row in genre_rows {
        associations
            .genres
            .entry(row.menu_id)
            .or_default()
            .insert(GenreId::new(row.genre_id));
    }

    let category_rows: Vec<MenuCategoryRow> = menu_category_relation::table
        .filter(menu_category_relation::menu_id.eq_any(menu_ids.to_vec()))
        .select(MenuCategoryRow::as_select())
        .load(conn)
        .await?;
    for row in category_rows {
        associations
            .categories
            .entry(row.menu_id)
            .or_default()
            .insert(CategoryId::new(row.category_id));
    }

    Ok(associations)
}

async fn hydrate(conn: &mut AsyncPgConnection, row: MenuRow) -> QueryResult<Menu> {
    let mut associations = load_associations(conn, &[row.menu_id]).await?;
    Ok(associations.attach(row))
}

/// Lock the menu row for the rest of the transaction.
async fn lock_menu(conn: &mut AsyncPgConnection, id: MenuId) -> Result<MenuRow, MenuTxError> {
    menu_list::table
        .find(id.get())
        .select(MenuRow::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()?
        .ok_or_else(|| TxError::Port(MenuRepositoryError::menu_not_found(id.get())))
}

/// Replace the genre set of `menu_id` with the requested ids that exist.
async fn write_genres(
    conn: &mut AsyncPgConnection,
    menu_id: i64,
    requested: &[GenreId],
) -> QueryResult<()> {
    diesel::delete(menu_genre_relation::table.filter(menu_genre_relation::menu_id.eq(menu_id)))
        .execute(conn)
        .await?;

    if requested.is_empty() {
        return Ok(());
    }

    let raw: Vec<i64> = requested.iter().map(|id| id.get()).collect();
    let existing: Vec<i64> = eating_genre_list::table
        .filter(eating_genre_list::genre_id.eq_any(raw))
        .select(eating_genre_list::genre_id)
        .load(conn)
        .await?;
    if existing.is_empty() {
        return Ok(());
    }

    let rows: Vec<MenuGenreRow> = existing
        .into_iter()
        .map(|genre_id| MenuGenreRow { menu_id, genre_id })
        .collect();
    diesel::insert_into(menu_genre_relation::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
    Ok(())
}

/// Replace the category set of `menu_id` with the requested ids that exist.
async fn write_categories(
    conn: &mut AsyncPgConnection,
    menu_id: i64,
    requested: &[CategoryId],
) -> QueryResult<()> {
    diesel::delete(
        menu_category_relation::table.filter(menu_category_relation::menu_id.eq(menu_id)),
    )
    .execute(conn)
    .await?;

    if requested.is_empty() {
        return Ok(());
    }

    let raw: Vec<i64> = requested.iter().map(|id| id.get()).collect();
    let existing: Vec<i64> = eating_category_list::table
        .filter(eating_category_list::category_id.eq_any(raw))
        .select(eating_category_list::category_id)
        .load(conn)
        .await?;
    if existing.is_empty() {
        return Ok(());
    }

    let rows: Vec<MenuCategoryRow> = existing
        .into_iter()
        .map(|category_id| MenuCategoryRow {
            menu_id,
            category_id,
        })
        .collect();
    diesel::insert_into(menu_category_relation::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl MenuRepository for DieselMenuRepository {
    async fn list_menus(&self) -> Result<Vec<Menu>, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MenuRow> = menu_list::table
            .select(MenuRow::as_select())
            .order(menu_list::menu_id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let menu_ids: Vec<i64> = rows.iter().map(|row| row.menu_id).collect();
        let mut associations = load_associations(&mut conn, &menu_ids)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| associations.attach(row))
            .collect())
    }

    async fn create_menu(&self, draft: &MenuDraft) -> Result<Menu, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let menu = conn
            .transaction::<_, MenuTxError, _>(|conn| {
                async move {
                    let row: MenuRow = diesel::insert_into(menu_list::table)
                        .values(&NewMenuRow {
                            menu_name: draft.name.as_ref(),
                        })
                        .returning(MenuRow::as_returning())
                        .get_result(conn)
                        .await?;

                    write_genres(conn, row.menu_id, &draft.genre_ids).await?;
                    write_categories(conn, row.menu_id, &draft.category_ids).await?;
                    Ok(hydrate(conn, row).await?)
                }
                .scope_boxed()
            })
            .await
            .map_err(TxError::into_port)?;

        info!(menu_id = menu.id.get(), "menu created");
        Ok(menu)
    }

    async fn update_menu(
        &self,
        id: MenuId,
        draft: &MenuDraft,
    ) -> Result<Menu, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, MenuTxError, _>(|conn| {
            async move {
                lock_menu(conn, id).await?;

                let row: MenuRow = diesel::update(menu_list::table.find(id.get()))
                    .set(&MenuUpdate {
                        menu_name: draft.name.as_ref(),
                    })
                    .returning(MenuRow::as_returning())
                    .get_result(conn)
                    .await?;

                write_genres(conn, row.menu_id, &draft.genre_ids).await?;
                write_categories(conn, row.menu_id, &draft.category_ids).await?;
                Ok(hydrate(conn, row).await?)
            }
            .scope_boxed()
        })
        .await
        .map_err(TxError::into_port)
    }

    async fn replace_genres(
        &self,
        id: MenuId,
        genre_ids: &[GenreId],
    ) -> Result<Menu, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, MenuTxError, _>(|conn| {
            async move {
                let row = lock_menu(conn, id).await?;
                write_genres(conn, row.menu_id, genre_ids).await?;
                Ok(hydrate(conn, row).await?)
            }
            .scope_boxed()
        })
        .await
        .map_err(TxError::into_port)
    }

    async fn replace_categories(
        &self,
        id: MenuId,
        category_ids: &[CategoryId],
    ) -> Result<Menu, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, MenuTxError, _>(|conn| {
            async move {
                let row = lock_menu(conn, id).await?;
                write_categories(conn, row.menu_id, category_ids).await?;
                Ok(hydrate(conn, row).await?)
            }
            .scope_boxed()
        })
        .await
        .map_err(TxError::into_port)
    }

    async fn delete_menu(&self, id: MenuId) -> Result<(), MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed_favorites = conn
            .transaction::<_, MenuTxError, _>(|conn| {
                async move {
                    let menu_id = lock_menu(conn, id).await?.menu_id;

                    diesel::delete(
                        menu_genre_relation::table.filter(menu_genre_relation::menu_id.eq(menu_id)),
                    )
                    .execute(conn)
                    .await?;
                    diesel::delete(
                        menu_category_relation::table
                            .filter(menu_category_relation::menu_id.eq(menu_id)),
                    )
                    .execute(conn)
                    .await?;
                    let removed_favorites =
                        diesel::delete(favorites::table.filter(favorites::menu_id.eq(menu_id)))
                            .execute(conn)
                            .await?;
                    diesel::delete(menu_list::table.find(menu_id))
                        .execute(conn)
                        .await?;
                    Ok(removed_favorites)
                }
                .scope_boxed()
            })
            .await
            .map_err(TxError::into_port)?;

        info!(menu_id = id.get(), removed_favorites, "menu deleted");
        Ok(())
    }
}
