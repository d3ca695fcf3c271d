//! Infrastructure Layer
//!
//! Challenge store implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryChallengeStore;
pub use postgres::PgChallengeStore;
