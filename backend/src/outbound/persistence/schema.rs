//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Menus.
    menu_list (menu_id) {
        menu_id -> Int8,
        /// At most 50 characters.
        menu_name -> Varchar,
    }
}

diesel::table! {
    /// Eating genre reference data.
    eating_genre_list (genre_id) {
        genre_id -> Int8,
        genre_name -> Varchar,
    }
}

diesel::table! {
    /// Eating category reference data.
    eating_category_list (category_id) {
        category_id -> Int8,
        category_name -> Varchar,
    }
}

diesel::table! {
    /// Menu to genre associations.
    menu_genre_relation (menu_id, genre_id) {
        menu_id -> Int8,
        genre_id -> Int8,
    }
}

diesel::table! {
    /// Menu to category associations.
    menu_category_relation (menu_id, category_id) {
        menu_id -> Int8,
        category_id -> Int8,
    }
}

diesel::table! {
    /// Application users keyed by identity-provider subject.
    users (user_id) {
        user_id -> Int8,
        /// Unique, at most 255 characters.
        auth0_sub -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Favourite menus. Unique on `(user_id, menu_id)`.
    ///
    /// `menu_id` has no foreign key; listing inner-joins `menu_list`.
    favorites (favorite_id) {
        favorite_id -> Int8,
        user_id -> Int8,
        menu_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(favorites -> menu_list (menu_id));
diesel::joinable!(favorites -> users (user_id));
diesel::joinable!(menu_category_relation -> menu_list (menu_id));
diesel::joinable!(menu_genre_relation -> menu_list (menu_id));

diesel::allow_tables_to_appear_in_same_query!(
    eating_category_list,
    eating_genre_list,
    favorites,
    menu_category_relation,
    menu_genre_relation,
    menu_list,
    users,
);
