//! Per-request CORS decision

use platform::client::{origin_host, strip_www};

/// Which tier admitted an origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowSource {
    /// Exact match against the configured list
    Static,
    /// Hostname found in the custom domain registry
    CustomDomain,
}

/// Outcome of evaluating one request's `Origin`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// No `Origin` header; leave the request alone
    NoOrigin,
    Allowed { origin: String, source: AllowSource },
    /// Origin present but untrusted; no headers are emitted
    Denied,
}

impl CorsDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, CorsDecision::Allowed { .. })
    }

    /// The origin to echo back, when allowed
    pub fn allowed_origin(&self) -> Option<&str> {
        match self {
            CorsDecision::Allowed { origin, .. } => Some(origin),
            _ => None,
        }
    }
}

/// Registry key for an origin: lowercase host, port and leading `www.` removed
pub fn registry_key(origin: &str) -> Option<String> {
    let host = origin_host(origin)?;
    let key = strip_www(&host);
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Registry keys to try for an origin, most specific first
///
/// `https://app.customtenant.com` yields `app.customtenant.com` and then
/// `customtenant.com`. Bare top-level labels are never produced.
pub fn registry_candidates(origin: &str) -> Vec<String> {
    let Some(key) = registry_key(origin) else {
        return Vec::new();
    };

    let mut candidates = vec![key.clone()];
    let mut rest = key.as_str();
    while let Some((_, parent)) = rest.split_once('.') {
        if !parent.contains('.') {
            break;
        }
        candidates.push(parent.to_string());
        rest = parent;
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_key_strips_www_and_port() {
        assert_eq!(
            registry_key("https://www.customtenant.com:8443").as_deref(),
            Some("customtenant.com")
        );
        assert_eq!(
            registry_key("https://App.CustomTenant.com").as_deref(),
            Some("app.customtenant.com")
        );
    }

    #[test]
    fn test_candidates_walk_up_to_registrable_domain() {
        assert_eq!(
            registry_candidates("https://app.customtenant.com"),
            vec!["app.customtenant.com", "customtenant.com"]
        );
        assert_eq!(
            registry_candidates("https://www.a.b.customtenant.com"),
            vec!["a.b.customtenant.com", "b.customtenant.com", "customtenant.com"]
        );
        assert_eq!(
            registry_candidates("https://customtenant.com"),
            vec!["customtenant.com"]
        );
        assert_eq!(registry_candidates("http://localhost:3000"), vec!["localhost"]);
        assert!(registry_candidates("not a url").is_empty());
    }

    #[test]
    fn test_registry_key_rejects_garbage() {
        assert_eq!(registry_key("not a url"), None);
    }

    #[test]
    fn test_allowed_origin() {
        let decision = CorsDecision::Allowed {
            origin: "https://eser.dev".to_string(),
            source: AllowSource::Static,
        };
        assert_eq!(decision.allowed_origin(), Some("https://eser.dev"));
        assert_eq!(CorsDecision::Denied.allowed_origin(), None);
        assert!(!CorsDecision::NoOrigin.is_allowed());
    }
}
