//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Challenge)
//! - Domain value objects (ChallengeToken, Difficulty)
//! - Domain services (solution predicates)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
