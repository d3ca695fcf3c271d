//! Verify Solution Use Case

use chrono::Utc;
use platform::client::IpHash;
use std::sync::Arc;

use crate::application::config::PowConfig;
use crate::domain::repository::ChallengeStore;
use crate::domain::services::SolutionPredicate;
use crate::domain::value_objects::ChallengeToken;
use crate::error::{PowError, PowResult};

/// Result of a successful verification call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Solution accepted and the challenge consumed
    Passed,
    /// PoW is switched off; nothing was checked
    Disabled,
}

impl Verification {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verification::Passed)
    }
}

/// Verify Solution Use Case
///
/// Fails closed on unknown, consumed and expired tokens. A wrong solution
/// does not consume the challenge; only an accepted one does.
pub struct VerifySolutionUseCase<C, P>
where
    C: ChallengeStore,
    P: SolutionPredicate,
{
    store: Arc<C>,
    predicate: Arc<P>,
    config: Arc<PowConfig>,
}

impl<C, P> VerifySolutionUseCase<C, P>
where
    C: ChallengeStore,
    P: SolutionPredicate,
{
    pub fn new(store: Arc<C>, predicate: Arc<P>, config: Arc<PowConfig>) -> Self {
        Self {
            store,
            predicate,
            config,
        }
    }

    pub async fn execute(&self, token: &str, solution: &str) -> PowResult<Verification> {
        if !self.config.enabled {
            return Ok(Verification::Disabled);
        }

        let token = ChallengeToken::parse(token)
            .ok_or_else(|| PowError::InvalidRequest("missing token".to_string()))?;
        let solution = solution.trim();
        if solution.is_empty() {
            return Err(PowError::InvalidRequest("missing solution".to_string()));
        }

        let Some(challenge) = self.store.find(&token).await? else {
            return Err(reject(PowError::ChallengeNotFound, None));
        };

        challenge
            .ensure_usable(Utc::now())
            .map_err(|e| reject(e, Some(&challenge.ip_hash)))?;

        if !self
            .predicate
            .is_valid(&token, solution, challenge.difficulty)
        {
            return Err(reject(PowError::SolutionInvalid, Some(&challenge.ip_hash)));
        }

        // Losing a consume race reads as already consumed.
        if !self.store.check_and_consume(&token).await? {
            return Err(reject(
                PowError::ChallengeAlreadyConsumed,
                Some(&challenge.ip_hash),
            ));
        }

        tracing::info!(ip_hash = %challenge.ip_hash, "Challenge consumed");

        Ok(Verification::Passed)
    }
}

fn reject(err: PowError, ip_hash: Option<&IpHash>) -> PowError {
    match ip_hash {
        Some(ip_hash) => {
            tracing::warn!(ip_hash = %ip_hash, kind = err.label(), "Challenge rejected");
        }
        None => {
            tracing::warn!(kind = err.label(), "Challenge rejected");
        }
    }
    err
}
