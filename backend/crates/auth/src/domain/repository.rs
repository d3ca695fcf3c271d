//! Repository Traits
//!
//! Interfaces for the collaborators this crate consumes. Implementations
//! live in the infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::{Session, SessionActivity};
use crate::domain::value_object::{MembershipRank, ResourceSlug, SessionToken};
use crate::error::AuthResult;

/// Session store
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Fetch a session by token
    async fn get_by_id(&self, token: &SessionToken) -> AuthResult<Option<Session>>;

    /// Refresh activity metadata
    ///
    /// Must never touch status or the logged-in user.
    async fn update_activity(
        &self,
        token: &SessionToken,
        activity: &SessionActivity,
    ) -> AuthResult<()>;
}

/// Membership lookup
#[trait_variant::make(MembershipLookup: Send)]
pub trait LocalMembershipLookup {
    /// Rank of `user_id` within `resource`, `None` when not a member
    async fn rank_of(
        &self,
        user_id: &UserId,
        resource: &ResourceSlug,
    ) -> AuthResult<Option<MembershipRank>>;
}
