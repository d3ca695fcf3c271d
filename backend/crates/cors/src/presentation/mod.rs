//! Presentation Layer

pub mod middleware;

pub use middleware::cors_trust;
