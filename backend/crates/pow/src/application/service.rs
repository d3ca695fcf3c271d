//! PoW Challenge Service
//!
//! Entry point used by handlers and the gate middleware.

use std::net::IpAddr;
use std::sync::Arc;

use crate::application::config::PowConfig;
use crate::application::issue_challenge::{IssueChallengeUseCase, IssueOutcome};
use crate::application::verify_solution::{Verification, VerifySolutionUseCase};
use crate::domain::repository::ChallengeStore;
use crate::domain::services::{LeadingZeroBits, SolutionPredicate};
use crate::error::PowResult;

pub struct PowChallengeService<C, P = LeadingZeroBits>
where
    C: ChallengeStore + Send + Sync + 'static,
    P: SolutionPredicate + 'static,
{
    store: Arc<C>,
    predicate: Arc<P>,
    config: Arc<PowConfig>,
}

impl<C> PowChallengeService<C, LeadingZeroBits>
where
    C: ChallengeStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<C>, config: Arc<PowConfig>) -> Self {
        Self::with_predicate(store, Arc::new(LeadingZeroBits), config)
    }
}

impl<C, P> PowChallengeService<C, P>
where
    C: ChallengeStore + Send + Sync + 'static,
    P: SolutionPredicate + 'static,
{
    pub fn with_predicate(store: Arc<C>, predicate: Arc<P>, config: Arc<PowConfig>) -> Self {
        Self {
            store,
            predicate,
            config,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &PowConfig {
        &self.config
    }

    pub async fn issue(&self, client_ip: Option<IpAddr>) -> PowResult<IssueOutcome> {
        IssueChallengeUseCase::new(self.store.clone(), self.config.clone())
            .execute(client_ip)
            .await
    }

    pub async fn verify(&self, token: &str, solution: &str) -> PowResult<Verification> {
        VerifySolutionUseCase::new(
            self.store.clone(),
            self.predicate.clone(),
            self.config.clone(),
        )
        .execute(token, solution)
        .await
    }
}
