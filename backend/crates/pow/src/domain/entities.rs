//! Domain Entities
//!
//! Core business entities for the PoW domain.

use chrono::{DateTime, Duration, Utc};
use platform::client::IpHash;

use crate::domain::value_objects::{ChallengeToken, Difficulty};
use crate::error::{PowError, PowResult};

/// Challenge entity - represents a PoW challenge issued to a client
///
/// Bound to the salted hash of the requester's IP, never the IP itself.
#[derive(Debug, Clone)]
pub struct Challenge {
    pub token: ChallengeToken,
    pub ip_hash: IpHash,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
}

impl Challenge {
    /// Create a new challenge with a fresh token
    pub fn issue(ip_hash: IpHash, difficulty: Difficulty, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: ChallengeToken::generate(),
            ip_hash,
            difficulty,
            created_at: now,
            expires_at: now + ttl,
            consumed_at: None,
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed_at.is_some()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the challenge may still be verified at `now`
    ///
    /// Consumption is reported before expiry.
    pub fn ensure_usable(&self, now: DateTime<Utc>) -> PowResult<()> {
        if self.is_consumed() {
            return Err(PowError::ChallengeAlreadyConsumed);
        }
        if self.is_expired_at(now) {
            return Err(PowError::ChallengeExpired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash() -> IpHash {
        IpHash::from_bytes([7u8; 32])
    }

    #[test]
    fn test_issue_sets_expiry() {
        let challenge = Challenge::issue(hash(), Difficulty::DEFAULT, Duration::minutes(5));
        assert_eq!(challenge.expires_at - challenge.created_at, Duration::minutes(5));
        assert!(!challenge.is_consumed());
        assert!(challenge.ensure_usable(Utc::now()).is_ok());
    }

    #[test]
    fn test_expired_challenge() {
        let challenge = Challenge::issue(hash(), Difficulty::DEFAULT, Duration::minutes(5));
        let later = challenge.expires_at + Duration::seconds(1);
        assert!(matches!(
            challenge.ensure_usable(later),
            Err(PowError::ChallengeExpired)
        ));
    }

    #[test]
    fn test_consumed_reported_before_expired() {
        let mut challenge = Challenge::issue(hash(), Difficulty::DEFAULT, Duration::minutes(5));
        challenge.consumed_at = Some(Utc::now());
        let later = challenge.expires_at + Duration::seconds(1);
        assert!(matches!(
            challenge.ensure_usable(later),
            Err(PowError::ChallengeAlreadyConsumed)
        ));
    }
}
