//! In-Memory Challenge Store
//!
//! Backs tests and single-process tooling. Consumption happens under one
//! lock, so concurrent verifiers see exactly one winner.

use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::entities::Challenge;
use crate::domain::repository::ChallengeStore;
use crate::domain::value_objects::ChallengeToken;
use crate::error::{PowError, PowResult};

#[derive(Default)]
pub struct MemoryChallengeStore {
    challenges: Mutex<HashMap<ChallengeToken, Challenge>>,
    fail: AtomicBool,
}

impl MemoryChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a challenge directly, bypassing issuance
    pub fn insert(&self, challenge: Challenge) {
        self.challenges
            .lock()
            .insert(challenge.token.clone(), challenge);
    }

    pub fn get(&self, token: &ChallengeToken) -> Option<Challenge> {
        self.challenges.lock().get(token).cloned()
    }

    pub fn len(&self) -> usize {
        self.challenges.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every store call fail
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> PowResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PowError::Internal("challenge store unavailable".to_string()));
        }
        Ok(())
    }
}

impl ChallengeStore for MemoryChallengeStore {
    async fn create(&self, challenge: &Challenge) -> PowResult<()> {
        self.check_available()?;
        self.insert(challenge.clone());
        Ok(())
    }

    async fn find(&self, token: &ChallengeToken) -> PowResult<Option<Challenge>> {
        self.check_available()?;
        Ok(self.get(token))
    }

    async fn check_and_consume(&self, token: &ChallengeToken) -> PowResult<bool> {
        self.check_available()?;
        let now = Utc::now();
        let mut challenges = self.challenges.lock();
        match challenges.get_mut(token) {
            Some(challenge) if !challenge.is_consumed() && !challenge.is_expired_at(now) => {
                challenge.consumed_at = Some(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn purge_expired(&self) -> PowResult<u64> {
        self.check_available()?;
        let now = Utc::now();
        let mut challenges = self.challenges.lock();
        let before = challenges.len();
        challenges.retain(|_, challenge| !challenge.is_expired_at(now));
        Ok((before - challenges.len()) as u64)
    }
}
