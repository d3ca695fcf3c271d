//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod config;
pub mod issue_challenge;
pub mod service;
pub mod sweep;
pub mod verify_solution;

pub use issue_challenge::{ChallengeDescriptor, IssueOutcome};
pub use service::PowChallengeService;
pub use sweep::spawn_expiry_sweep;
pub use verify_solution::Verification;
