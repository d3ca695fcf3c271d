//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::application::{AccessController, ResolvedSession};
use crate::domain::repository::MembershipLookup;
use crate::domain::value_object::ResourceSlug;
use crate::error::AuthResult;
use crate::presentation::dto::{AccessCheckResponse, AccessQuery, SessionStatusResponse};
use crate::presentation::extract::AuthenticatedUser;

/// Shared state for auth handlers
pub struct AuthAppState<M>
where
    M: MembershipLookup + Send + Sync + 'static,
{
    pub access: AccessController<M>,
}

impl<M> Clone for AuthAppState<M>
where
    M: MembershipLookup + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            access: self.access.clone(),
        }
    }
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status(session: Option<ResolvedSession>) -> Json<SessionStatusResponse> {
    let response = match session {
        Some(session) => SessionStatusResponse {
            authenticated: session.is_authenticated(),
            user_id: session.user_id.map(|id| id.to_string()),
            last_activity_at: Some(session.last_activity_at),
        },
        None => SessionStatusResponse {
            authenticated: false,
            user_id: None,
            last_activity_at: None,
        },
    };

    Json(response)
}

// ============================================================================
// Access Check
// ============================================================================

/// GET /api/auth/access/{slug}?rank=...
pub async fn check_access<M>(
    State(state): State<AuthAppState<M>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(slug): Path<String>,
    Query(query): Query<AccessQuery>,
) -> AuthResult<Json<AccessCheckResponse>>
where
    M: MembershipLookup + Send + Sync + 'static,
{
    let resource = ResourceSlug::new(slug);
    let granted = state
        .access
        .has_access(&user_id, &resource, query.rank)
        .await?;

    Ok(Json(AccessCheckResponse {
        resource: resource.to_string(),
        required_rank: query.rank,
        granted,
    }))
}

/// GET /api/auth/authorize/{slug}?rank=...
///
/// `204` when the rank is held, `403` when it is not.
pub async fn authorize_access<M>(
    State(state): State<AuthAppState<M>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(slug): Path<String>,
    Query(query): Query<AccessQuery>,
) -> AuthResult<StatusCode>
where
    M: MembershipLookup + Send + Sync + 'static,
{
    state
        .access
        .authorize(&user_id, &ResourceSlug::new(slug), query.rank)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
