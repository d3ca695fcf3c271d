//! Application Layer

pub mod config;
pub mod engine;

pub use config::CorsConfig;
pub use engine::CorsTrustEngine;
