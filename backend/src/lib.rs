//! Marketplace backend library modules.
//!
//! The crate is organised hexagonally: `domain` holds entities, services,
//! and ports; `inbound` adapts HTTP onto driving ports; `outbound` adapts
//! driven ports onto PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Trace middleware attaching request-scoped identifiers.
pub use middleware::Trace;
