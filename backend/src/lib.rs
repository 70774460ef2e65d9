//! Menu catalogue and favourites backend.
//!
//! Hexagonal layout: [`domain`] holds entities, ports and services;
//! [`inbound::http`] exposes them over Actix Web; [`outbound`] implements the
//! persistence and key set ports; [`config`] reads runtime settings.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
