//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **jwks**: fetches and caches the identity provider's signing keys.
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod jwks;
pub mod persistence;
