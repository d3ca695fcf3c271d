//! Infrastructure Layer
//!
//! Database implementations and in-memory stand-ins.

pub mod memory;
pub mod postgres;

pub use memory::{MemoryMembershipStore, MemorySessionStore};
pub use postgres::PgAuthRepository;
