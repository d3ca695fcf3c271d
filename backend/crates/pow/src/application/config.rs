//! Application Configuration
//!
//! Configuration for the PoW application layer.

use std::time::Duration;

use platform::crypto::SecretKey;

use crate::domain::value_objects::Difficulty;

/// PoW application configuration
#[derive(Debug, Clone)]
pub struct PowConfig {
    /// Global switch; when off, issuance reports `Disabled` and gates pass
    pub enabled: bool,
    /// Difficulty in leading zero bits
    pub difficulty: Difficulty,
    /// Challenge TTL
    pub challenge_ttl: Duration,
    /// Salt for client IP hashing
    pub ip_hash_salt: SecretKey,
    /// How often expired challenges are deleted
    pub sweep_interval: Duration,
}

impl Default for PowConfig {
    /// Enabled, default difficulty, five-minute TTL, random salt
    fn default() -> Self {
        Self {
            enabled: true,
            difficulty: Difficulty::DEFAULT,
            challenge_ttl: Duration::from_secs(300),
            ip_hash_salt: SecretKey::random(32),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl PowConfig {
    /// Create config with an explicit salt
    pub fn new(ip_hash_salt: SecretKey) -> Self {
        Self {
            ip_hash_salt,
            ..Self::default()
        }
    }

    /// Create config for development (cheap puzzles)
    pub fn development() -> Self {
        Self {
            difficulty: Difficulty::new(12).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_challenge_ttl(mut self, ttl: Duration) -> Self {
        self.challenge_ttl = ttl;
        self
    }

    pub fn with_sweep_interval(mut self, every: Duration) -> Self {
        self.sweep_interval = every;
        self
    }

    pub fn challenge_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.challenge_ttl).unwrap_or(chrono::Duration::minutes(5))
    }
}
