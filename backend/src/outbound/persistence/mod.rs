//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types. Business rules stay in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **One transaction per write**: multi-statement writes run inside
//!   `AsyncConnection::transaction` and abort with a port error via
//!   `TxError`.
//!
//! # Example
//!
//! ```rust,no_run
//! use menu_backend::outbound::persistence::{DbPool, DieselMenuRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/menus")).await?;
//! let menus = DieselMenuRepository::new(pool);
//! # let _ = menus;
//! # Ok(())
//! # }
//! ```

mod diesel_favorite_repository;
pub(crate) mod diesel_helpers;
mod diesel_menu_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_menu_repository::DieselMenuRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
