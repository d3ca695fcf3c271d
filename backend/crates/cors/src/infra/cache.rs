//! TTL cache in front of a domain registry
//!
//! Answers may be stale by up to the TTL. Misses are cached too; errors
//! are not. The cache holds at most `capacity` hostnames and evicts the
//! least recently used one when full.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::domain::registry::CustomDomainRegistry;
use crate::error::CorsResult;

struct CacheEntry {
    resource_slug: Option<String>,
    fetched_at: Instant,
}

pub struct CachedDomainRegistry<R>
where
    R: CustomDomainRegistry + Send + Sync,
{
    inner: R,
    ttl: Duration,
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl<R> CachedDomainRegistry<R>
where
    R: CustomDomainRegistry + Send + Sync,
{
    /// A zero capacity is raised to one.
    pub fn new(inner: R, ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Drop a cached answer so the next lookup goes to the registry
    pub fn invalidate(&self, domain: &str) {
        self.entries.lock().pop(domain);
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fresh(&self, domain: &str) -> Option<Option<String>> {
        let mut entries = self.entries.lock();
        let entry = entries.get(domain)?;
        if entry.fetched_at.elapsed() < self.ttl {
            return Some(entry.resource_slug.clone());
        }
        entries.pop(domain);
        None
    }
}

impl<R> CustomDomainRegistry for CachedDomainRegistry<R>
where
    R: CustomDomainRegistry + Send + Sync,
{
    async fn lookup_by_domain(&self, domain: &str) -> CorsResult<Option<String>> {
        if let Some(hit) = self.fresh(domain) {
            return Ok(hit);
        }

        let resource_slug = self.inner.lookup_by_domain(domain).await?;
        self.entries.lock().put(
            domain.to_string(),
            CacheEntry {
                resource_slug: resource_slug.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(resource_slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryDomainRegistry;

    #[test]
    fn test_hits_and_misses_are_cached() {
        let cache = CachedDomainRegistry::new(MemoryDomainRegistry::new(), Duration::from_secs(60), 16);
        cache.inner().register("customtenant.com", "tenant");

        for _ in 0..3 {
            let hit = tokio_test::block_on(cache.lookup_by_domain("customtenant.com")).unwrap();
            assert_eq!(hit.as_deref(), Some("tenant"));
            let miss = tokio_test::block_on(cache.lookup_by_domain("evil.example")).unwrap();
            assert_eq!(miss, None);
        }

        assert_eq!(cache.inner().lookups(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_stale_answer_served_until_invalidated() {
        let cache = CachedDomainRegistry::new(MemoryDomainRegistry::new(), Duration::from_secs(60), 16);
        cache.inner().register("customtenant.com", "tenant");
        tokio_test::block_on(cache.lookup_by_domain("customtenant.com")).unwrap();

        cache.inner().remove("customtenant.com");
        let stale = tokio_test::block_on(cache.lookup_by_domain("customtenant.com")).unwrap();
        assert_eq!(stale.as_deref(), Some("tenant"));

        cache.invalidate("customtenant.com");
        let fresh = tokio_test::block_on(cache.lookup_by_domain("customtenant.com")).unwrap();
        assert_eq!(fresh, None);
    }

    #[test]
    fn test_zero_ttl_always_refetches() {
        let cache = CachedDomainRegistry::new(MemoryDomainRegistry::new(), Duration::ZERO, 16);

        tokio_test::block_on(cache.lookup_by_domain("a.example")).unwrap();
        tokio_test::block_on(cache.lookup_by_domain("a.example")).unwrap();
        assert_eq!(cache.inner().lookups(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let cache = CachedDomainRegistry::new(MemoryDomainRegistry::new(), Duration::from_secs(60), 8);

        for i in 0..1000 {
            let domain = format!("attacker-{i}.example");
            tokio_test::block_on(cache.lookup_by_domain(&domain)).unwrap();
            assert!(cache.len() <= 8);
        }

        assert_eq!(cache.len(), 8);
        assert_eq!(cache.capacity(), 8);
    }

    #[test]
    fn test_recently_used_entry_survives_eviction() {
        let cache = CachedDomainRegistry::new(MemoryDomainRegistry::new(), Duration::from_secs(60), 2);
        cache.inner().register("customtenant.com", "tenant");

        tokio_test::block_on(cache.lookup_by_domain("customtenant.com")).unwrap();
        tokio_test::block_on(cache.lookup_by_domain("a.example")).unwrap();
        tokio_test::block_on(cache.lookup_by_domain("customtenant.com")).unwrap();
        tokio_test::block_on(cache.lookup_by_domain("b.example")).unwrap();
        assert_eq!(cache.inner().lookups(), 3);

        tokio_test::block_on(cache.lookup_by_domain("customtenant.com")).unwrap();
        assert_eq!(cache.inner().lookups(), 3);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let cache = CachedDomainRegistry::new(MemoryDomainRegistry::new(), Duration::from_secs(60), 0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = CachedDomainRegistry::new(MemoryDomainRegistry::new(), Duration::from_secs(60), 16);
        cache.inner().register("customtenant.com", "tenant");
        cache.inner().fail(true);

        assert!(tokio_test::block_on(cache.lookup_by_domain("customtenant.com")).is_err());
        assert!(cache.is_empty());

        cache.inner().fail(false);
        let hit = tokio_test::block_on(cache.lookup_by_domain("customtenant.com")).unwrap();
        assert_eq!(hit.as_deref(), Some("tenant"));
    }
}
