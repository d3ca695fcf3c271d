//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Session, SessionActivity};
use crate::domain::repository::{MembershipLookup, SessionStore};
use crate::domain::value_object::{MembershipRank, ResourceSlug, SessionStatus, SessionToken};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Session Store Implementation
// ============================================================================

impl SessionStore for PgAuthRepository {
    async fn get_by_id(&self, token: &SessionToken) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                id,
                status,
                logged_in_user_id,
                last_activity_at,
                user_agent,
                expires_at,
                created_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn update_activity(
        &self,
        token: &SessionToken,
        activity: &SessionActivity,
    ) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE sessions SET
                last_activity_at = $2,
                user_agent = COALESCE($3, user_agent)
            WHERE id = $1
            "#,
        )
        .bind(token.as_str())
        .bind(activity.last_activity_at)
        .bind(&activity.user_agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Membership Lookup Implementation
// ============================================================================

impl MembershipLookup for PgAuthRepository {
    async fn rank_of(
        &self,
        user_id: &UserId,
        resource: &ResourceSlug,
    ) -> AuthResult<Option<MembershipRank>> {
        let code: Option<String> = sqlx::query_scalar(
            r#"
            SELECT rank
            FROM resource_memberships
            WHERE resource_slug = $1
              AND user_id = $2
              AND deleted_at IS NULL
            "#,
        )
        .bind(resource.as_str())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        code.map(|code| {
            MembershipRank::from_code(&code)
                .ok_or_else(|| AuthError::Internal(format!("Invalid membership rank: {code}")))
        })
        .transpose()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: String,
    status: String,
    logged_in_user_id: Option<Uuid>,
    last_activity_at: DateTime<Utc>,
    user_agent: Option<String>,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> AuthResult<Session> {
        let id = SessionToken::parse(&self.id)
            .ok_or_else(|| AuthError::Internal("Empty session id in store".to_string()))?;

        // Unknown status codes are treated as revoked so they never authorize.
        let status = SessionStatus::from_code(&self.status).unwrap_or(SessionStatus::Revoked);

        Ok(Session {
            id,
            status,
            logged_in_user_id: self.logged_in_user_id.map(UserId::from_uuid),
            last_activity_at: self.last_activity_at,
            user_agent: self.user_agent,
            expires_at: self.expires_at,
            created_at: self.created_at,
        })
    }
}
