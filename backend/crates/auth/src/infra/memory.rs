//! In-Memory Repository Implementations
//!
//! Used by tests and local tooling. Failure switches let callers exercise
//! the collaborator-error paths.

use kernel::id::UserId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::domain::entity::{Session, SessionActivity};
use crate::domain::repository::{MembershipLookup, SessionStore};
use crate::domain::value_object::{MembershipRank, ResourceSlug, SessionToken};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionToken, Session>>,
    reads: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: Session) {
        self.sessions.write().insert(session.id.clone(), session);
    }

    pub fn get(&self, token: &SessionToken) -> Option<Session> {
        self.sessions.read().get(token).cloned()
    }

    /// Number of `get_by_id` calls served
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SessionStore for MemorySessionStore {
    async fn get_by_id(&self, token: &SessionToken) -> AuthResult<Option<Session>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("session store unavailable".to_string()));
        }
        Ok(self.get(token))
    }

    async fn update_activity(
        &self,
        token: &SessionToken,
        activity: &SessionActivity,
    ) -> AuthResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("session store unavailable".to_string()));
        }
        if let Some(session) = self.sessions.write().get_mut(token) {
            session.touch(activity);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryMembershipStore {
    ranks: RwLock<HashMap<(UserId, ResourceSlug), MembershipRank>>,
    fail: AtomicBool,
}

impl MemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, user_id: UserId, resource: ResourceSlug, rank: MembershipRank) {
        self.ranks.write().insert((user_id, resource), rank);
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl MembershipLookup for MemoryMembershipStore {
    async fn rank_of(
        &self,
        user_id: &UserId,
        resource: &ResourceSlug,
    ) -> AuthResult<Option<MembershipRank>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("membership store unavailable".to_string()));
        }
        Ok(self
            .ranks
            .read()
            .get(&(*user_id, resource.clone()))
            .copied())
    }
}
