//! CORS configuration
//!
//! Built once at startup and shared read-only.

use std::time::Duration;

/// Headers a browser may send cross-origin by default
pub const DEFAULT_ALLOWED_HEADERS: &[&str] = &[
    "Content-Type",
    "Authorization",
    "Accept",
    "X-PoW-Token",
    "X-PoW-Solution",
];

pub const DEFAULT_ALLOWED_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Exact, case-sensitive origin strings
    pub allowed_origins: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    /// How long a custom domain answer may be served from cache
    pub cache_ttl: Duration,
    /// Upper bound on cached hostnames, hits and misses together
    pub cache_capacity: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_headers: to_strings(DEFAULT_ALLOWED_HEADERS),
            allowed_methods: to_strings(DEFAULT_ALLOWED_METHODS),
            cache_ttl: Duration::from_secs(300),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl CorsConfig {
    /// Local frontend origins
    pub fn development() -> Self {
        Self::default().with_allowed_origins([
            "http://localhost:40922",
            "http://127.0.0.1:40922",
        ])
    }

    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allowed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allowed_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Exact string match against the static list
    pub fn is_static_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_match_is_exact_and_case_sensitive() {
        let config = CorsConfig::default().with_allowed_origins(["https://eser.dev"]);

        assert!(config.is_static_origin("https://eser.dev"));
        assert!(!config.is_static_origin("https://ESER.dev"));
        assert!(!config.is_static_origin("https://eser.dev/"));
        assert!(!config.is_static_origin("https://www.eser.dev"));
    }

    #[test]
    fn test_development_origins() {
        let config = CorsConfig::development();
        assert!(config.is_static_origin("http://localhost:40922"));
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }
}
