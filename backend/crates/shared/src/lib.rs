//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every trust-layer crate agrees on:
//! - The unified error type and its HTTP-mapped kinds
//! - Typed identifiers shared between bounded contexts
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
