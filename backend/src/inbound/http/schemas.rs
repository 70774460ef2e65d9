//! Request and response bodies plus OpenAPI schema definitions.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema` or
//! carrying wire field names. This module owns the JSON shapes, all in
//! snake_case, and the conversions from domain values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Favorite, FavoriteStatus, FavoriteWithMenu, Menu, User};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to act on the resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// The database is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "menu 7 not found")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "6f1c2d3e-4b5a-4c6d-8e7f-0123456789ab")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /v1/menus` and `PUT /v1/menus/{menu_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuRequest {
    #[schema(example = "Katsu curry")]
    pub menu_name: String,
    /// Unknown genre ids are dropped.
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    /// Unknown category ids are dropped.
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

/// Body of `PATCH /v1/menus/{menu_id}/genres`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenreIdsRequest {
    pub genre_ids: Vec<i64>,
}

/// Body of `PATCH /v1/menus/{menu_id}/categories`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryIdsRequest {
    pub category_ids: Vec<i64>,
}

/// Body of `POST /v1/favorites`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddFavoriteRequest {
    #[schema(example = 3)]
    pub menu_id: i64,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuBody {
    pub menu_id: i64,
    pub menu_name: String,
    /// Ascending.
    pub genre_ids: Vec<i64>,
    /// Ascending.
    pub category_ids: Vec<i64>,
}

impl From<Menu> for MenuBody {
    fn from(menu: Menu) -> Self {
        Self {
            menu_id: menu.id.get(),
            menu_name: menu.name,
            genre_ids: menu.genre_ids.into_iter().map(i64::from).collect(),
            category_ids: menu.category_ids.into_iter().map(i64::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuResponse {
    pub menu: MenuBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenusResponse {
    pub menus: Vec<MenuBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const OK: Self = Self { success: true };
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    #[schema(example = "pong")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserBody {
    pub user_id: i64,
    #[schema(example = "auth0|65f0c0ffee")]
    pub auth0_sub: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.get(),
            auth0_sub: user.subject.as_ref().to_owned(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: UserBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavoriteBody {
    pub favorite_id: i64,
    pub user_id: i64,
    pub menu_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteBody {
    fn from(favorite: Favorite) -> Self {
        Self {
            favorite_id: favorite.id.get(),
            user_id: favorite.user_id.get(),
            menu_id: favorite.menu_id.get(),
            created_at: favorite.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavoriteResponse {
    pub favorite: FavoriteBody,
}

/// A favourite together with the menu it references.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavoriteMenuBody {
    pub favorite_id: i64,
    pub menu_id: i64,
    pub created_at: DateTime<Utc>,
    pub menu: MenuBody,
}

impl From<FavoriteWithMenu> for FavoriteMenuBody {
    fn from(entry: FavoriteWithMenu) -> Self {
        Self {
            favorite_id: entry.favorite.id.get(),
            menu_id: entry.favorite.menu_id.get(),
            created_at: entry.favorite.created_at,
            menu: entry.menu.into(),
        }
    }
}

/// Newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteMenuBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavoriteStatusResponse {
    pub is_favorite: bool,
    /// Present when `is_favorite` is true.
    pub favorite_id: Option<i64>,
}

impl From<FavoriteStatus> for FavoriteStatusResponse {
    fn from(status: FavoriteStatus) -> Self {
        Self {
            is_favorite: status.is_favorite,
            favorite_id: status.favorite_id.map(i64::from),
        }
    }
}
