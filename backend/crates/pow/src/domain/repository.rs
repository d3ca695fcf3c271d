//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::Challenge;
use crate::domain::value_objects::ChallengeToken;
use crate::error::PowResult;

/// Challenge store trait
#[trait_variant::make(ChallengeStore: Send)]
pub trait LocalChallengeStore {
    /// Persist a newly issued challenge
    async fn create(&self, challenge: &Challenge) -> PowResult<()>;

    /// Look up a challenge by token, consumed or not
    async fn find(&self, token: &ChallengeToken) -> PowResult<Option<Challenge>>;

    /// Atomically mark the challenge consumed
    ///
    /// Returns `true` only for the single caller that flipped an unconsumed,
    /// unexpired challenge. Every other caller gets `false`.
    async fn check_and_consume(&self, token: &ChallengeToken) -> PowResult<bool>;

    /// Delete challenges past their expiry, consumed or not
    async fn purge_expired(&self) -> PowResult<u64>;
}
