//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod favorites;
pub mod health;
pub mod menus;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;
pub use validation::json_config;

/// Register every `/v1` route. Mount inside `web::scope("/v1")`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use menu_backend::inbound::http::configure_v1;
///
/// let app = App::new().service(web::scope("/v1").configure(configure_v1));
/// ```
pub fn configure_v1(cfg: &mut web::ServiceConfig) {
    cfg.service(health::ping)
        .service(menus::list_menus)
        .service(menus::create_menu)
        .service(menus::update_menu)
        .service(menus::delete_menu)
        .service(menus::update_genres)
        .service(menus::update_categories)
        .service(users::current_user)
        .service(favorites::list_favorites)
        .service(favorites::add_favorite)
        .service(favorites::remove_favorite_by_id)
        .service(favorites::remove_favorite)
        .service(favorites::favorite_status);
}
