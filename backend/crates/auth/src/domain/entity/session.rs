//! Session Entity
//!
//! A stored browser session. Created and deleted elsewhere; this layer only
//! reads it and refreshes its activity metadata.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{SessionStatus, SessionToken};

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque token (primary key)
    pub id: SessionToken,
    pub status: SessionStatus,
    /// Absent for anonymous sessions
    pub logged_in_user_id: Option<UserId>,
    pub last_activity_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Usable at `now`: status is Active and the lifetime has not passed
    ///
    /// The stored status may lag behind `expires_at`, so both are checked.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status.is_active() && self.expires_at > now
    }

    pub fn is_anonymous(&self) -> bool {
        self.logged_in_user_id.is_none()
    }

    /// Apply an activity touch
    ///
    /// Only `last_activity_at` and `user_agent` change.
    pub fn touch(&mut self, activity: &SessionActivity) {
        self.last_activity_at = activity.last_activity_at;
        if activity.user_agent.is_some() {
            self.user_agent = activity.user_agent.clone();
        }
    }
}

/// Activity metadata written back on each resolved request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionActivity {
    pub last_activity_at: DateTime<Utc>,
    pub user_agent: Option<String>,
}

impl SessionActivity {
    pub fn now(user_agent: Option<String>) -> Self {
        Self {
            last_activity_at: Utc::now(),
            user_agent,
        }
    }
}
