//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{favorites, menu_category_relation, menu_genre_relation, menu_list, users};

/// Row struct for reading from the `menu_list` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = menu_list)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MenuRow {
    pub menu_id: i64,
    pub menu_name: String,
}

/// Insertable struct for new menus.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = menu_list)]
pub(crate) struct NewMenuRow<'a> {
    pub menu_name: &'a str,
}

/// Changeset for renaming a menu.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = menu_list)]
pub(crate) struct MenuUpdate<'a> {
    pub menu_name: &'a str,
}

// ---------------------------------------------------------------------------
// Association models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = menu_genre_relation)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MenuGenreRow {
    pub menu_id: i64,
    pub genre_id: i64,
}

#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = menu_category_relation)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MenuCategoryRow {
    pub menu_id: i64,
    pub category_id: i64,
}

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub auth0_sub: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new users; timestamps use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub auth0_sub: &'a str,
}

// ---------------------------------------------------------------------------
// Favourite models
// ---------------------------------------------------------------------------

/// Row struct for reading from the `favorites` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FavoriteRow {
    pub favorite_id: i64,
    pub user_id: i64,
    pub menu_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub user_id: i64,
    pub menu_id: i64,
}
