//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client origin resolution (client IP, Origin header, salted IP hashing)
//! - Credential extraction (cookies, bearer tokens)
//! - Cryptographic utilities (SHA-256, HMAC, Base64, secrets)
//! - Environment configuration helpers
//! - Detached background tasks

pub mod client;
pub mod config;
pub mod cookie;
pub mod crypto;
pub mod detached;
