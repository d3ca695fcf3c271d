//! Issue Challenge Use Case

use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;

use platform::client::IpHash;

use crate::application::config::PowConfig;
use crate::domain::entities::Challenge;
use crate::domain::repository::ChallengeStore;
use crate::domain::value_objects::{ChallengeToken, Difficulty};
use crate::error::PowResult;

/// What the client needs to solve a challenge
#[derive(Debug, Clone)]
pub struct ChallengeDescriptor {
    pub token: ChallengeToken,
    pub difficulty: Difficulty,
    pub expires_at: DateTime<Utc>,
}

/// Result of asking for a challenge
#[derive(Debug, Clone)]
pub enum IssueOutcome {
    Issued(ChallengeDescriptor),
    /// PoW is switched off; not an error
    Disabled,
}

/// Issue Challenge Use Case
pub struct IssueChallengeUseCase<C>
where
    C: ChallengeStore,
{
    store: Arc<C>,
    config: Arc<PowConfig>,
}

impl<C> IssueChallengeUseCase<C>
where
    C: ChallengeStore,
{
    pub fn new(store: Arc<C>, config: Arc<PowConfig>) -> Self {
        Self { store, config }
    }

    /// Mint and persist a challenge for `client_ip`
    ///
    /// Not rate limited: concurrent calls yield independent tokens.
    pub async fn execute(&self, client_ip: Option<IpAddr>) -> PowResult<IssueOutcome> {
        if !self.config.enabled {
            return Ok(IssueOutcome::Disabled);
        }

        let ip_hash = IpHash::derive(&self.config.ip_hash_salt, client_ip);
        let challenge = Challenge::issue(
            ip_hash,
            self.config.difficulty,
            self.config.challenge_ttl_chrono(),
        );

        self.store.create(&challenge).await?;

        tracing::info!(
            ip_hash = %challenge.ip_hash,
            difficulty = challenge.difficulty.bits(),
            "Issued challenge"
        );

        Ok(IssueOutcome::Issued(ChallengeDescriptor {
            token: challenge.token,
            difficulty: challenge.difficulty,
            expires_at: challenge.expires_at,
        }))
    }
}
