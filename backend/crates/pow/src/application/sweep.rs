//! Expired Challenge Sweep
//!
//! Every issued challenge leaves a row behind. The sweep deletes expired
//! ones on a fixed interval for as long as the process runs; the first pass
//! happens immediately.

use platform::detached::{DetachedHandle, spawn_detached};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::domain::repository::ChallengeStore;
use crate::error::PowResult;

/// Start the sweep in the background
///
/// A failed pass is logged and the next tick tries again.
pub fn spawn_expiry_sweep<C>(store: Arc<C>, every: Duration) -> DetachedHandle
where
    C: ChallengeStore + Send + Sync + 'static,
{
    spawn_detached("pow-expiry-sweep", sweep(store, every))
}

async fn sweep<C>(store: Arc<C>, every: Duration) -> PowResult<()>
where
    C: ChallengeStore + Send + Sync + 'static,
{
    let mut ticker = tokio::time::interval(every.max(Duration::from_secs(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match store.purge_expired().await {
            Ok(0) => {}
            Ok(deleted) => tracing::info!(challenges = deleted, "Purged expired challenges"),
            Err(e) => tracing::warn!(error = %e, kind = e.label(), "Challenge sweep failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Challenge;
    use crate::domain::value_objects::Difficulty;
    use crate::infra::memory::MemoryChallengeStore;
    use platform::client::IpHash;

    fn challenge(ttl: chrono::Duration) -> Challenge {
        Challenge::issue(IpHash::from_bytes([3; 32]), Difficulty::DEFAULT, ttl)
    }

    #[tokio::test]
    async fn test_first_pass_runs_immediately() {
        let store = Arc::new(MemoryChallengeStore::new());
        store.insert(challenge(chrono::Duration::seconds(-1)));
        store.insert(challenge(chrono::Duration::minutes(5)));

        let _handle = spawn_expiry_sweep(store.clone(), Duration::from_secs(3600));

        for _ in 0..50 {
            if store.len() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_pass_keeps_the_sweep_alive() {
        let store = Arc::new(MemoryChallengeStore::new());
        store.fail(true);

        let handle = spawn_expiry_sweep(store.clone(), Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(50)).await;

        store.fail(false);
        store.insert(challenge(chrono::Duration::seconds(-1)));

        for _ in 0..300 {
            if store.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(store.is_empty());
        assert_eq!(handle.label(), "pow-expiry-sweep");
    }
}
