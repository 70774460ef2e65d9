//! Menu API handlers.
//!
//! ```text
//! GET    /v1/menus
//! POST   /v1/menus {"menu_name":"Ramen","genre_ids":[1],"category_ids":[2]}
//! PUT    /v1/menus/{menu_id}
//! DELETE /v1/menus/{menu_id}
//! PATCH  /v1/menus/{menu_id}/genres {"genre_ids":[1,2]}
//! PATCH  /v1/menus/{menu_id}/categories {"category_ids":[3]}
//! ```
//!
//! Menu routes are public. Requested genre and category ids that name no
//! reference row are dropped; the response shows the stored sets.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::{CategoryId, Error, GenreId, MenuDraft, MenuId, MenuName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    CategoryIdsRequest, ErrorSchema, GenreIdsRequest, MenuRequest, MenuResponse, MenusResponse,
    SuccessResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{MENU_ID, menu_name_error, parse_id};

impl TryFrom<MenuRequest> for MenuDraft {
    type Error = Error;

    fn try_from(request: MenuRequest) -> Result<Self, Self::Error> {
        let name = MenuName::new(&request.menu_name).map_err(|err| menu_name_error(&err))?;
        Ok(Self {
            name,
            genre_ids: request.genre_ids.into_iter().map(GenreId::new).collect(),
            category_ids: request
                .category_ids
                .into_iter()
                .map(CategoryId::new)
                .collect(),
        })
    }
}

/// List every menu with its genre and category ids, ordered by id.
#[utoipa::path(
    get,
    path = "/v1/menus",
    responses(
        (status = 200, description = "All menus", body = MenusResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["menus"],
    operation_id = "listMenus",
    security([])
)]
#[get("/menus")]
pub async fn list_menus(state: web::Data<HttpState>) -> ApiResult<web::Json<MenusResponse>> {
    let menus = state.menus_query.list_menus().await?;
    Ok(web::Json(MenusResponse {
        menus: menus.into_iter().map(Into::into).collect(),
    }))
}

/// Create a menu.
#[utoipa::path(
    post,
    path = "/v1/menus",
    request_body = MenuRequest,
    responses(
        (status = 201, description = "Menu created", body = MenuResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["menus"],
    operation_id = "createMenu",
    security([])
)]
#[post("/menus")]
pub async fn create_menu(
    state: web::Data<HttpState>,
    payload: web::Json<MenuRequest>,
) -> ApiResult<HttpResponse> {
    let draft = MenuDraft::try_from(payload.into_inner())?;
    let menu = state.menus.create_menu(draft).await?;
    Ok(HttpResponse::Created().json(MenuResponse { menu: menu.into() }))
}

/// Rename a menu and replace both of its association sets.
#[utoipa::path(
    put,
    path = "/v1/menus/{menu_id}",
    params(("menu_id" = i64, Path, description = "Menu identifier")),
    request_body = MenuRequest,
    responses(
        (status = 200, description = "Menu updated", body = MenuResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Menu not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["menus"],
    operation_id = "updateMenu",
    security([])
)]
#[put("/menus/{menu_id}")]
pub async fn update_menu(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<MenuRequest>,
) -> ApiResult<web::Json<MenuResponse>> {
    let id: MenuId = parse_id(&path, MENU_ID)?;
    let draft = MenuDraft::try_from(payload.into_inner())?;
    let menu = state.menus.update_menu(id, draft).await?;
    Ok(web::Json(MenuResponse { menu: menu.into() }))
}

/// Delete a menu, its associations and the favourites that reference it.
#[utoipa::path(
    delete,
    path = "/v1/menus/{menu_id}",
    params(("menu_id" = i64, Path, description = "Menu identifier")),
    responses(
        (status = 200, description = "Menu deleted", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Menu not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["menus"],
    operation_id = "deleteMenu",
    security([])
)]
#[delete("/menus/{menu_id}")]
pub async fn delete_menu(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let id: MenuId = parse_id(&path, MENU_ID)?;
    state.menus.delete_menu(id).await?;
    Ok(web::Json(SuccessResponse::OK))
}

/// Replace the genre set of a menu.
#[utoipa::path(
    patch,
    path = "/v1/menus/{menu_id}/genres",
    params(("menu_id" = i64, Path, description = "Menu identifier")),
    request_body = GenreIdsRequest,
    responses(
        (status = 200, description = "Genres replaced", body = MenuResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Menu not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["menus"],
    operation_id = "updateMenuGenres",
    security([])
)]
#[patch("/menus/{menu_id}/genres")]
pub async fn update_genres(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<GenreIdsRequest>,
) -> ApiResult<web::Json<MenuResponse>> {
    let id: MenuId = parse_id(&path, MENU_ID)?;
    let genre_ids = payload
        .into_inner()
        .genre_ids
        .into_iter()
        .map(GenreId::new)
        .collect();
    let menu = state.menus.update_genres(id, genre_ids).await?;
    Ok(web::Json(MenuResponse { menu: menu.into() }))
}

/// Replace the category set of a menu.
#[utoipa::path(
    patch,
    path = "/v1/menus/{menu_id}/categories",
    params(("menu_id" = i64, Path, description = "Menu identifier")),
    request_body = CategoryIdsRequest,
    responses(
        (status = 200, description = "Categories replaced", body = MenuResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Menu not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["menus"],
    operation_id = "updateMenuCategories",
    security([])
)]
#[patch("/menus/{menu_id}/categories")]
pub async fn update_categories(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CategoryIdsRequest>,
) -> ApiResult<web::Json<MenuResponse>> {
    let id: MenuId = parse_id(&path, MENU_ID)?;
    let category_ids = payload
        .into_inner()
        .category_ids
        .into_iter()
        .map(CategoryId::new)
        .collect();
    let menu = state.menus.update_categories(id, category_ids).await?;
    Ok(web::Json(MenuResponse { menu: menu.into() }))
}

#[cfg(test)]
#[path = "menus_tests.rs"]
mod tests;
