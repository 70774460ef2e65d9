//! Favourite API handlers. All routes require a bearer token.
//!
//! ```text
//! GET    /v1/favorites
//! POST   /v1/favorites {"menu_id":3}
//! DELETE /v1/favorites/{menu_id}
//! DELETE /v1/favorites/id/{favorite_id}
//! GET    /v1/favorites/{menu_id}/status
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::{FavoriteId, MenuId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{
    AddFavoriteRequest, ErrorSchema, FavoriteResponse, FavoriteStatusResponse, FavoritesResponse,
    SuccessResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FAVORITE_ID, MENU_ID, check_id, parse_id};

/// List the caller's favourites with menu detail, newest first.
#[utoipa::path(
    get,
    path = "/v1/favorites",
    responses(
        (status = 200, description = "Favourites", body = FavoritesResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites"
)]
#[get("/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<FavoritesResponse>> {
    let favorites = state
        .favorites_query
        .list_favorites(caller.user_id())
        .await?;
    Ok(web::Json(FavoritesResponse {
        favorites: favorites.into_iter().map(Into::into).collect(),
    }))
}

/// Add a menu to the caller's favourites.
#[utoipa::path(
    post,
    path = "/v1/favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Favourite added", body = FavoriteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Menu not found", body = ErrorSchema),
        (status = 409, description = "Already a favourite", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "addFavorite"
)]
#[post("/favorites")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<AddFavoriteRequest>,
) -> ApiResult<HttpResponse> {
    let menu_id = check_id(payload.menu_id, MENU_ID, MenuId::try_new)?;
    let favorite = state
        .favorites
        .add_favorite(caller.user_id(), menu_id)
        .await?;
    Ok(HttpResponse::Created().json(FavoriteResponse {
        favorite: favorite.into(),
    }))
}

/// Remove a menu from the caller's favourites.
#[utoipa::path(
    delete,
    path = "/v1/favorites/{menu_id}",
    params(("menu_id" = i64, Path, description = "Menu identifier")),
    responses(
        (status = 200, description = "Favourite removed", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not a favourite", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "removeFavorite"
)]
#[delete("/favorites/{menu_id}")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let menu_id: MenuId = parse_id(&path, MENU_ID)?;
    state
        .favorites
        .remove_favorite(caller.user_id(), menu_id)
        .await?;
    Ok(web::Json(SuccessResponse::OK))
}

/// Remove a favourite by its id. Only the owner may remove it.
#[utoipa::path(
    delete,
    path = "/v1/favorites/id/{favorite_id}",
    params(("favorite_id" = i64, Path, description = "Favourite identifier")),
    responses(
        (status = 200, description = "Favourite removed", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Favourite not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "removeFavoriteById"
)]
#[delete("/favorites/id/{favorite_id}")]
pub async fn remove_favorite_by_id(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let favorite_id: FavoriteId = parse_id(&path, FAVORITE_ID)?;
    state
        .favorites
        .remove_favorite_by_id(caller.user_id(), favorite_id)
        .await?;
    Ok(web::Json(SuccessResponse::OK))
}

/// Whether a menu is one of the caller's favourites.
#[utoipa::path(
    get,
    path = "/v1/favorites/{menu_id}/status",
    params(("menu_id" = i64, Path, description = "Menu identifier")),
    responses(
        (status = 200, description = "Favourite status", body = FavoriteStatusResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Menu not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "favoriteStatus"
)]
#[get("/favorites/{menu_id}/status")]
pub async fn favorite_status(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<FavoriteStatusResponse>> {
    let menu_id: MenuId = parse_id(&path, MENU_ID)?;
    let status = state
        .favorites_query
        .favorite_status(caller.user_id(), menu_id)
        .await?;
    Ok(web::Json(status.into()))
}

#[cfg(test)]
#[path = "favorites_tests.rs"]
mod tests;
