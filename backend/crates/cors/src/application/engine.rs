//! CORS Trust Engine
//!
//! Two-tier origin check: the static list first (no I/O), then the custom
//! domain registry keyed by hostname with `www.` removed. A subdomain of a
//! registered domain is trusted as well.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue};
use std::sync::Arc;

use crate::application::config::CorsConfig;
use crate::domain::{AllowSource, CorsDecision, CustomDomainRegistry, registry_candidates};
use crate::error::{CorsError, CorsResult};

pub struct CorsTrustEngine<R>
where
    R: CustomDomainRegistry + Send + Sync + 'static,
{
    registry: Arc<R>,
    config: Arc<CorsConfig>,
    allow_headers: HeaderValue,
    allow_methods: HeaderValue,
}

impl<R> CorsTrustEngine<R>
where
    R: CustomDomainRegistry + Send + Sync + 'static,
{
    /// Build the engine, rendering the static header lists once
    pub fn new(registry: Arc<R>, config: Arc<CorsConfig>) -> CorsResult<Self> {
        let allow_headers = join_header(&config.allowed_headers, "allowed headers")?;
        let allow_methods = join_header(&config.allowed_methods, "allowed methods")?;

        Ok(Self {
            registry,
            config,
            allow_headers,
            allow_methods,
        })
    }

    pub fn config(&self) -> &CorsConfig {
        &self.config
    }

    /// Evaluate a request's `Origin`
    ///
    /// Never fails: a registry error is logged and the origin is denied.
    pub async fn decide(&self, origin: Option<&str>) -> CorsDecision {
        let Some(origin) = origin else {
            return CorsDecision::NoOrigin;
        };

        if self.config.is_static_origin(origin) {
            return CorsDecision::Allowed {
                origin: origin.to_string(),
                source: AllowSource::Static,
            };
        }

        let candidates = registry_candidates(origin);
        if candidates.is_empty() {
            tracing::debug!(origin = %origin, "Unparseable origin");
            return CorsDecision::Denied;
        }

        for domain in &candidates {
            match self.registry.lookup_by_domain(domain).await {
                Ok(Some(_)) => {
                    return CorsDecision::Allowed {
                        origin: origin.to_string(),
                        source: AllowSource::CustomDomain,
                    };
                }
                Ok(None) => {}
                Err(e) => {
                    e.log(domain);
                    return CorsDecision::Denied;
                }
            }
        }

        tracing::debug!(origin = %origin, "Origin not trusted");
        CorsDecision::Denied
    }

    /// Write the four CORS headers for an allowed decision
    ///
    /// Other decisions leave `headers` untouched.
    pub fn apply(&self, decision: &CorsDecision, headers: &mut HeaderMap) {
        let Some(origin) = decision.allowed_origin() else {
            return;
        };
        let Ok(origin) = HeaderValue::from_str(origin) else {
            return;
        };

        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
    }
}

fn join_header(values: &[String], what: &str) -> CorsResult<HeaderValue> {
    HeaderValue::from_str(&values.join(", "))
        .map_err(|e| CorsError::Internal(format!("invalid {what}: {e}")))
}
