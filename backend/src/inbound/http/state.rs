//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FavoriteCommand, FavoriteQuery, MenuCommand, MenuQuery, RequestAuthenticator,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub menus: Arc<dyn MenuCommand>,
    pub menus_query: Arc<dyn MenuQuery>,
    pub favorites: Arc<dyn FavoriteCommand>,
    pub favorites_query: Arc<dyn FavoriteQuery>,
    /// Bearer-token authentication used by the [`super::auth::AuthenticatedUser`]
    /// extractor.
    pub authenticator: Arc<dyn RequestAuthenticator>,
}
