//! Cross-origin trust
//!
//! Decides per request whether the `Origin` may make credentialed calls.
//! Origins are trusted when they match the static list exactly or when
//! their hostname (minus `www.`) is a registered custom domain or a
//! subdomain of one.
//!
//! - `domain/` - decision types and the registry trait
//! - `application/` - `CorsConfig` and `CorsTrustEngine`
//! - `infra/` - PostgreSQL, in-memory and cached registries
//! - `presentation/` - the `cors_trust` middleware

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::{CorsConfig, CorsTrustEngine};
pub use domain::{AllowSource, CorsDecision, CustomDomainRegistry};
pub use error::{CorsError, CorsResult};
pub use infra::{CachedDomainRegistry, MemoryDomainRegistry, PgDomainRegistry};
pub use presentation::cors_trust;

#[cfg(test)]
mod tests;
