//! In-Memory Domain Registry

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::domain::registry::CustomDomainRegistry;
use crate::error::{CorsError, CorsResult};

#[derive(Default)]
pub struct MemoryDomainRegistry {
    domains: RwLock<HashMap<String, String>>,
    lookups: AtomicUsize,
    fail: AtomicBool,
}

impl MemoryDomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, domain: &str, resource_slug: &str) {
        self.domains
            .write()
            .insert(domain.to_string(), resource_slug.to_string());
    }

    pub fn remove(&self, domain: &str) {
        self.domains.write().remove(domain);
    }

    /// Number of `lookup_by_domain` calls served
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl CustomDomainRegistry for MemoryDomainRegistry {
    async fn lookup_by_domain(&self, domain: &str) -> CorsResult<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(CorsError::Internal("domain registry unavailable".to_string()));
        }
        Ok(self.domains.read().get(domain).cloned())
    }
}
