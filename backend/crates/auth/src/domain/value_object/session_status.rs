//! Session Status Value Object
//!
//! Lifecycle state of a stored session. Only `Active` sessions authorize
//! anything; this layer reads the status but never writes it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum SessionStatus {
    /// Usable session
    #[default]
    Active = 0,

    /// Explicitly revoked (sign-out, admin action)
    Revoked = 1,

    /// Passed its lifetime
    Expired = 2,
}

impl SessionStatus {
    /// Get string code for storage and logs
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
        }
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Create from string code
    ///
    /// Unknown codes yield `None`; callers treat that as not active.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "revoked" => Some(Self::Revoked),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(SessionStatus::from_code("active"), Some(SessionStatus::Active));
        assert_eq!(SessionStatus::from_code("revoked"), Some(SessionStatus::Revoked));
        assert_eq!(SessionStatus::from_code("expired"), Some(SessionStatus::Expired));
        assert_eq!(SessionStatus::from_code("ACTIVE"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionStatus::Active.to_string(), "active");
        assert_eq!(SessionStatus::Revoked.to_string(), "revoked");
    }

    #[test]
    fn test_only_active_is_active() {
        assert!(SessionStatus::Active.is_active());
        assert!(!SessionStatus::Revoked.is_active());
        assert!(!SessionStatus::Expired.is_active());
    }
}
