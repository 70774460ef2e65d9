//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed entities shared by the HTTP and persistence
//! adapters, the port traits at the hexagonal boundary, and the services that
//! implement the driving ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Menu, MenuDraft, MenuName: menus and their association sets.
//! - User, Subject, ResolvedUser: lazily created application users.
//! - Favorite, FavoriteWithMenu, FavoriteStatus: per-user favourites.
//! - TokenVerifier, AuthenticationService: bearer-token authentication.

pub mod auth;
pub mod error;
pub mod favorite;
mod favorite_service;
mod identity_service;
pub mod ids;
pub mod menu;
mod menu_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{AuthError, AuthenticationService, TokenVerifier};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::favorite::{Favorite, FavoriteStatus, FavoriteWithMenu};
pub use self::favorite_service::FavoriteService;
pub use self::identity_service::IdentityService;
pub use self::ids::{CategoryId, FavoriteId, GenreId, IdValidationError, MenuId, UserId};
pub use self::menu::{MENU_NAME_MAX, Menu, MenuDraft, MenuName, MenuValidationError};
pub use self::menu_service::MenuService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{ResolvedUser, SUBJECT_MAX, Subject, SubjectValidationError, User};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use menu_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
