//! Access Control
//!
//! Rank checks for operations scoped to a resource. Mutations require a
//! higher rank than private reads; callers pick the rank.

use kernel::id::UserId;
use std::sync::Arc;

use crate::domain::repository::MembershipLookup;
use crate::domain::value_object::{MembershipRank, ResourceSlug};
use crate::error::{AuthError, AuthResult};

/// Access controller
pub struct AccessController<M>
where
    M: MembershipLookup + Send + Sync + 'static,
{
    memberships: Arc<M>,
}

impl<M> Clone for AccessController<M>
where
    M: MembershipLookup + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            memberships: self.memberships.clone(),
        }
    }
}

impl<M> AccessController<M>
where
    M: MembershipLookup + Send + Sync + 'static,
{
    pub fn new(memberships: Arc<M>) -> Self {
        Self { memberships }
    }

    /// Whether `user_id` holds at least `required` within `resource`
    ///
    /// No membership and a lower rank are both `Ok(false)`. A lookup
    /// failure is an error, never a denial.
    pub async fn has_access(
        &self,
        user_id: &UserId,
        resource: &ResourceSlug,
        required: MembershipRank,
    ) -> AuthResult<bool> {
        let rank = self
            .memberships
            .rank_of(user_id, resource)
            .await
            .inspect_err(|e| {
                tracing::error!(resource = %resource, error = %e, "Membership lookup failed");
            })?;

        Ok(rank.is_some_and(|rank| rank.satisfies(required)))
    }

    /// Like [`has_access`](Self::has_access), mapped for handlers
    ///
    /// `false` becomes `Forbidden`, a lookup failure becomes `Internal`.
    pub async fn authorize(
        &self,
        user_id: &UserId,
        resource: &ResourceSlug,
        required: MembershipRank,
    ) -> AuthResult<()> {
        match self.has_access(user_id, resource, required).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::debug!(resource = %resource, required = %required, "Access denied");
                Err(AuthError::Forbidden)
            }
            Err(_) => Err(AuthError::Internal(format!(
                "membership lookup failed for resource {resource}"
            ))),
        }
    }
}
