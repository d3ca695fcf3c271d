//! PostgreSQL Domain Registry

use sqlx::PgPool;

use crate::domain::registry::CustomDomainRegistry;
use crate::error::CorsResult;

#[derive(Clone)]
pub struct PgDomainRegistry {
    pool: PgPool,
}

impl PgDomainRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CustomDomainRegistry for PgDomainRegistry {
    async fn lookup_by_domain(&self, domain: &str) -> CorsResult<Option<String>> {
        let slug = sqlx::query_scalar::<_, String>(
            r#"
            SELECT resource_slug
            FROM custom_domains
            WHERE domain = $1 AND deleted_at IS NULL
            LIMIT 1
            "#,
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slug)
    }
}
