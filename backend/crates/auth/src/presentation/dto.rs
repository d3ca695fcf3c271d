//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::MembershipRank;

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub last_activity_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Access Check
// ============================================================================

/// Access check query (`?rank=maintainer`)
#[derive(Debug, Clone, Deserialize)]
pub struct AccessQuery {
    pub rank: MembershipRank,
}

/// Access check response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheckResponse {
    pub resource: String,
    pub required_rank: MembershipRank,
    pub granted: bool,
}
