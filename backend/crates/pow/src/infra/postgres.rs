//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use platform::client::IpHash;
use sqlx::PgPool;

use crate::domain::entities::Challenge;
use crate::domain::repository::ChallengeStore;
use crate::domain::value_objects::{ChallengeToken, Difficulty};
use crate::error::{PowError, PowResult};

/// PostgreSQL-backed challenge store
#[derive(Clone)]
pub struct PgChallengeStore {
    pool: PgPool,
}

impl PgChallengeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ChallengeStore for PgChallengeStore {
    async fn create(&self, challenge: &Challenge) -> PowResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pow_challenges (
                token,
                ip_hash,
                difficulty_bits,
                created_at,
                expires_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(challenge.token.as_str())
        .bind(challenge.ip_hash.as_bytes().as_slice())
        .bind(i16::from(challenge.difficulty.bits()))
        .bind(challenge.created_at)
        .bind(challenge.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, token: &ChallengeToken) -> PowResult<Option<Challenge>> {
        let row = sqlx::query_as::<_, ChallengeRow>(
            r#"
            SELECT token, ip_hash, difficulty_bits, created_at, expires_at, consumed_at
            FROM pow_challenges
            WHERE token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ChallengeRow::into_challenge).transpose()
    }

    async fn check_and_consume(&self, token: &ChallengeToken) -> PowResult<bool> {
        let consumed = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE pow_challenges
            SET consumed_at = now()
            WHERE token = $1 AND consumed_at IS NULL AND expires_at > now()
            RETURNING token
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(consumed.is_some())
    }

    async fn purge_expired(&self) -> PowResult<u64> {
        let deleted = sqlx::query("DELETE FROM pow_challenges WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct ChallengeRow {
    token: String,
    ip_hash: Vec<u8>,
    difficulty_bits: i16,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    consumed_at: Option<DateTime<Utc>>,
}

impl ChallengeRow {
    fn into_challenge(self) -> PowResult<Challenge> {
        let token = ChallengeToken::parse(&self.token)
            .ok_or_else(|| PowError::Internal("stored challenge has blank token".to_string()))?;
        let ip_hash = IpHash::try_from(self.ip_hash.as_slice())
            .map_err(|_| PowError::Internal("stored ip_hash has wrong length".to_string()))?;
        let difficulty = u8::try_from(self.difficulty_bits)
            .ok()
            .and_then(Difficulty::new)
            .ok_or_else(|| {
                PowError::Internal(format!(
                    "stored difficulty out of range: {}",
                    self.difficulty_bits
                ))
            })?;

        Ok(Challenge {
            token,
            ip_hash,
            difficulty,
            created_at: self.created_at,
            expires_at: self.expires_at,
            consumed_at: self.consumed_at,
        })
    }
}
