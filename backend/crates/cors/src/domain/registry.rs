//! Custom Domain Registry
//!
//! Tenant-configured hostnames that count as trusted origins.

use crate::error::CorsResult;

/// Lookup of registered custom domains
#[trait_variant::make(CustomDomainRegistry: Send)]
pub trait LocalCustomDomainRegistry {
    /// Resource slug owning `domain`, or `None` when unregistered
    ///
    /// `domain` is a lowercase hostname without port or leading `www.`.
    async fn lookup_by_domain(&self, domain: &str) -> CorsResult<Option<String>>;
}
