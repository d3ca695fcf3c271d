//! PoW (Proof of Work) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Challenge entity, predicate, store trait
//! - `application/` - Issue and verify use cases behind `PowChallengeService`,
//!   plus the background sweep of expired challenges
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers and the gate middleware
//!
//! ## Security Model
//! - The backend alone mints tokens and fixes difficulty and TTL
//! - Challenges are bound to a salted IP hash; raw IPs are never stored
//! - Consumption is atomic: a solved challenge passes exactly once
//! - Every rejection renders the same `400` body

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PowConfig;
pub use application::{
    ChallengeDescriptor, IssueOutcome, PowChallengeService, Verification, spawn_expiry_sweep,
};
pub use domain::services::{LeadingZeroBits, SolutionPredicate};
pub use domain::value_objects::{ChallengeToken, Difficulty};
pub use error::{PowError, PowResult};
pub use infra::memory::MemoryChallengeStore;
pub use infra::postgres::PgChallengeStore;
pub use presentation::middleware::require_pow_solution;
pub use presentation::router::{pow_router, pow_router_generic};
