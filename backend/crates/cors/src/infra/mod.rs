//! Infrastructure Layer
//!
//! Registry implementations and the TTL cache wrapper.

pub mod cache;
pub mod memory;
pub mod postgres;

pub use cache::CachedDomainRegistry;
pub use memory::MemoryDomainRegistry;
pub use postgres::PgDomainRegistry;
