//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`KeyResolver`]) are implemented by outbound
//! adapters and report port-specific errors. Driving ports (`*Command`,
//! `*Query`, [`UserIdentity`], [`RequestAuthenticator`]) are implemented by
//! domain services and report the domain [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod favorite_command;
mod favorite_query;
mod favorite_repository;
mod key_resolver;
mod menu_command;
mod menu_query;
mod menu_repository;
mod request_authenticator;
mod user_identity;
mod user_repository;

pub use favorite_command::FavoriteCommand;
#[cfg(test)]
pub use favorite_command::MockFavoriteCommand;
pub use favorite_query::FavoriteQuery;
#[cfg(test)]
pub use favorite_query::MockFavoriteQuery;
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{FavoriteRepository, FavoriteRepositoryError};
#[cfg(test)]
pub use key_resolver::MockKeyResolver;
pub use key_resolver::{
    KeyResolver, KeyResolverError, KeySet, StaticKeyResolver, VerificationKey,
};
pub use menu_command::MenuCommand;
#[cfg(test)]
pub use menu_command::MockMenuCommand;
#[cfg(test)]
pub use menu_query::MockMenuQuery;
pub use menu_query::MenuQuery;
#[cfg(test)]
pub use menu_repository::MockMenuRepository;
pub use menu_repository::{MenuRepository, MenuRepositoryError};
#[cfg(test)]
pub use request_authenticator::MockRequestAuthenticator;
pub use request_authenticator::RequestAuthenticator;
#[cfg(test)]
pub use user_identity::MockUserIdentity;
pub use user_identity::UserIdentity;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
