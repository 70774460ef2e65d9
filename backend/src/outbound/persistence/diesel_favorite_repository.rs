//! PostgreSQL-backed `FavoriteRepository` implementation using Diesel ORM.
//!
//! Adding a favourite checks for an existing pair before checking that the
//! menu exists, so a duplicate of a since-deleted menu still reports the
//! duplicate. The `(user_id, menu_id)` unique index backs the pre-check when
//! two requests race.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::info;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::{Favorite, FavoriteId, FavoriteStatus, FavoriteWithMenu, MenuId, UserId};

use super::diesel_helpers::{TxError, is_unique_violation, map_diesel_error, map_pool_error};
use super::diesel_menu_repository::load_associations;
use super::models::{FavoriteRow, MenuRow, NewFavoriteRow};
use super::pool::DbPool;
use super::schema::{favorites, menu_list};

type FavoriteTxError = TxError<FavoriteRepositoryError>;

/// Diesel-backed implementation of the `FavoriteRepository` port.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_favorite(row: FavoriteRow) -> Favorite {
    Favorite {
        id: FavoriteId::new(row.favorite_id),
        user_id: UserId::new(row.user_id),
        menu_id: MenuId::new(row.menu_id),
        created_at: row.created_at,
    }
}

async fn menu_exists(conn: &mut AsyncPgConnection, menu_id: MenuId) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(menu_list::table.find(menu_id.get())))
        .get_result(conn)
        .await
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn add_favorite(
        &self,
        user_id: UserId,
        menu_id: MenuId,
    ) -> Result<Favorite, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let duplicate = move || {
            TxError::Port(FavoriteRepositoryError::duplicate_favorite(
                user_id.get(),
                menu_id.get(),
            ))
        };

        let row = conn
            .transaction::<_, FavoriteTxError, _>(|conn| {
                async move {
                    let existing: Option<i64> = favorites::table
                        .filter(favorites::user_id.eq(user_id.get()))
                        .filter(favorites::menu_id.eq(menu_id.get()))
                        .select(favorites::favorite_id)
                        .first(conn)
                        .await
                        .optional()?;
                    if existing.is_some() {
                        return Err(duplicate());
                    }

                    if !menu_exists(conn, menu_id).await? {
                        return Err(TxError::Port(FavoriteRepositoryError::menu_not_found(
                            menu_id.get(),
                        )));
                    }

                    diesel::insert_into(favorites::table)
                        .values(&NewFavoriteRow {
                            user_id: user_id.get(),
                            menu_id: menu_id.get(),
                        })
                        .returning(FavoriteRow::as_returning())
                        .get_result::<FavoriteRow>(conn)
                        .await
                        .map_err(|error| {
                            if is_unique_violation(&error) {
                                duplicate()
                            } else {
                                TxError::Diesel(error)
                            }
                        })
                }
                .scope_boxed()
            })
            .await
            .map_err(TxError::into_port)?;

        info!(
            favorite_id = row.favorite_id,
            user_id = row.user_id,
            menu_id = row.menu_id,
            "favorite added"
        );
        Ok(row_to_favorite(row))
    }

    async fn remove_favorite(
        &self,
        user_id: UserId,
        menu_id: MenuId,
    ) -> Result<(), FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id.get()))
                .filter(favorites::menu_id.eq(menu_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if removed == 0 {
            return Err(FavoriteRepositoryError::favorite_not_found());
        }
        Ok(())
    }

    async fn remove_favorite_by_id(
        &self,
        favorite_id: FavoriteId,
        owner: UserId,
    ) -> Result<(), FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, FavoriteTxError, _>(|conn| {
            async move {
                let holder: Option<i64> = favorites::table
                    .find(favorite_id.get())
                    .select(favorites::user_id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;

                match holder {
                    None => Err(TxError::Port(FavoriteRepositoryError::favorite_not_found())),
                    Some(holder) if holder != owner.get() => Err(TxError::Port(
                        FavoriteRepositoryError::not_owner(favorite_id.get()),
                    )),
                    Some(_) => {
                        diesel::delete(favorites::table.find(favorite_id.get()))
                            .execute(conn)
                            .await?;
                        Ok(())
                    }
                }
            }
            .scope_boxed()
        })
        .await
        .map_err(TxError::into_port)
    }

    async fn list_favorites(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FavoriteWithMenu>, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(FavoriteRow, MenuRow)> = favorites::table
            .inner_join(menu_list::table)
            .filter(favorites::user_id.eq(user_id.get()))
            .order((favorites::created_at.desc(), favorites::favorite_id.desc()))
            .select((FavoriteRow::as_select(), MenuRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let menu_ids: Vec<i64> = rows.iter().map(|(_, menu)| menu.menu_id).collect();
        let mut associations = load_associations(&mut conn, &menu_ids)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(favorite, menu)| FavoriteWithMenu {
                favorite: row_to_favorite(favorite),
                menu: associations.attach(menu),
            })
            .collect())
    }

    async fn favorite_status(
        &self,
        user_id: UserId,
        menu_id: MenuId,
    ) -> Result<FavoriteStatus, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let exists = menu_exists(&mut conn, menu_id)
            .await
            .map_err(map_diesel_error)?;
        if !exists {
            return Err(FavoriteRepositoryError::menu_not_found(menu_id.get()));
        }

        let favorite_id: Option<i64> = favorites::table
            .filter(favorites::user_id.eq(user_id.get()))
            .filter(favorites::menu_id.eq(menu_id.get()))
            .select(favorites::favorite_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(FavoriteStatus::from_favorite(favorite_id.map(FavoriteId::new)))
    }
}
