//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request and response bodies from [`crate::inbound::http::schemas`], and the
//! bearer token security scheme. Menu endpoints and the probes opt out of the
//! global security requirement.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    AddFavoriteRequest, CategoryIdsRequest, ErrorCodeSchema, ErrorSchema, FavoriteBody,
    FavoriteMenuBody, FavoriteResponse, FavoriteStatusResponse, FavoritesResponse,
    GenreIdsRequest, MenuBody, MenuRequest, MenuResponse, MenusResponse, PingResponse,
    SuccessResponse, UserBody, UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Access token issued by the identity provider for this API's audience.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Menu backend API",
        description = "Menu catalogue management and per-user favourites.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::health::ping,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::menus::list_menus,
        crate::inbound::http::menus::create_menu,
        crate::inbound::http::menus::update_menu,
        crate::inbound::http::menus::delete_menu,
        crate::inbound::http::menus::update_genres,
        crate::inbound::http::menus::update_categories,
        crate::inbound::http::users::current_user,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::favorites::add_favorite,
        crate::inbound::http::favorites::remove_favorite,
        crate::inbound::http::favorites::remove_favorite_by_id,
        crate::inbound::http::favorites::favorite_status,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MenuRequest,
        GenreIdsRequest,
        CategoryIdsRequest,
        AddFavoriteRequest,
        MenuBody,
        MenuResponse,
        MenusResponse,
        SuccessResponse,
        PingResponse,
        UserBody,
        UserResponse,
        FavoriteBody,
        FavoriteResponse,
        FavoriteMenuBody,
        FavoritesResponse,
        FavoriteStatusResponse,
    )),
    tags(
        (name = "menus", description = "Menu catalogue management"),
        (name = "users", description = "Authenticated user resolution"),
        (name = "favorites", description = "Per-user favourite menus"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
