//! Domain Value Objects
//!
//! Immutable value types for the PoW domain.

use std::fmt;

use platform::crypto::random_token;

/// Random bytes behind each challenge token
pub const TOKEN_BYTES: usize = 32;

/// Opaque challenge token (URL-safe base64, no padding)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChallengeToken(String);

impl ChallengeToken {
    /// Mint a fresh random token
    pub fn generate() -> Self {
        Self(random_token(TOKEN_BYTES))
    }

    /// Accept a client-supplied token; blank input yields `None`
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ChallengeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "ChallengeToken({prefix}..)")
    }
}

/// Difficulty level for PoW
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const DEFAULT: Difficulty = Difficulty(18);
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 32; // Max practical difficulty

    pub fn new(bits: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&bits) {
            Some(Self(bits))
        } else {
            None
        }
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits: u8 = s.trim().parse().map_err(|e| format!("{e}"))?;
        Self::new(bits).ok_or_else(|| {
            format!(
                "difficulty must be between {} and {} bits",
                Self::MIN,
                Self::MAX
            )
        })
    }
}
