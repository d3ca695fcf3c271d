//! Domain Layer

pub mod decision;
pub mod registry;

pub use decision::{AllowSource, CorsDecision, registry_candidates, registry_key};
pub use registry::CustomDomainRegistry;
