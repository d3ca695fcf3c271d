//! Detached Background Tasks
//!
//! Fire-and-forget work that must never fail or delay the request that
//! started it. Failures are logged under a label and otherwise swallowed.

use std::fmt::Display;
use std::future::Future;

use tokio::task::JoinHandle;

/// Handle to a detached task
///
/// Dropping it leaves the task running. Tests and shutdown paths may `join`
/// to wait for completion.
#[derive(Debug)]
pub struct DetachedHandle {
    label: &'static str,
    inner: JoinHandle<bool>,
}

impl DetachedHandle {
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Wait for the task; returns `true` if the work succeeded
    pub async fn join(self) -> bool {
        match self.inner.await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(task = self.label, error = %e, "detached task aborted");
                false
            }
        }
    }
}

/// Spawn `work` on the runtime without awaiting it
///
/// An `Err` is logged at `warn` and never surfaces to the caller.
pub fn spawn_detached<F, E>(label: &'static str, work: F) -> DetachedHandle
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let inner = tokio::spawn(async move {
        match work.await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(task = label, error = %e, "detached task failed");
                false
            }
        }
    });
    DetachedHandle { label, inner }
}
