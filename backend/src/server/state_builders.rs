//! Builders wiring repositories, services and the authenticator into
//! [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use menu_backend::domain::ports::KeyResolver;
use menu_backend::domain::{
    AuthenticationService, FavoriteService, IdentityService, MenuService, TokenVerifier,
};
use menu_backend::inbound::http::state::HttpState;
use menu_backend::outbound::jwks::{CachedKeyResolver, HttpJwksSource};
use menu_backend::outbound::persistence::{
    DieselFavoriteRepository, DieselMenuRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build the key resolver, caching it when a TTL is configured.
fn build_key_resolver(config: &ServerConfig) -> std::io::Result<Arc<dyn KeyResolver>> {
    let source = HttpJwksSource::for_domain(&config.auth0.domain, config.jwks_timeout)
        .map_err(|err| std::io::Error::other(format!("invalid JWKS endpoint: {err}")))?;
    info!(endpoint = %source.endpoint(), "using identity provider key set");

    let resolver: Arc<dyn KeyResolver> = match config.jwks_cache_ttl {
        Some(ttl) => Arc::new(CachedKeyResolver::new(Arc::new(source), ttl)),
        None => Arc::new(source),
    };
    Ok(resolver)
}

/// Assemble the handler state from the configured pool and identity
/// provider.
///
/// # Errors
/// Returns [`std::io::Error`] when the key set endpoint cannot be built.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let pool = &config.db_pool;

    let menus = Arc::new(MenuService::new(Arc::new(DieselMenuRepository::new(
        pool.clone(),
    ))));
    let favorites = Arc::new(FavoriteService::new(Arc::new(
        DieselFavoriteRepository::new(pool.clone()),
    )));
    let identity = Arc::new(IdentityService::new(Arc::new(DieselUserRepository::new(
        pool.clone(),
    ))));

    let verifier = TokenVerifier::new(
        build_key_resolver(config)?,
        config.auth0.audience.clone(),
        Arc::new(DefaultClock),
    );
    let authenticator = Arc::new(AuthenticationService::new(verifier, identity));

    Ok(web::Data::new(HttpState {
        menus: menus.clone(),
        menus_query: menus,
        favorites: favorites.clone(),
        favorites_query: favorites,
        authenticator,
    }))
}
