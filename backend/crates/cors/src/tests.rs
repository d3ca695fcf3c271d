//! Middleware tests for the cors crate

#[cfg(test)]
mod middleware_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::header::{
        ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
        ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN,
    };
    use axum::http::{Method, Request, StatusCode};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::application::{CorsConfig, CorsTrustEngine};
    use crate::infra::{CachedDomainRegistry, MemoryDomainRegistry};
    use crate::presentation::cors_trust;

    type Registry = CachedDomainRegistry<MemoryDomainRegistry>;

    fn app(registry: Arc<Registry>) -> Router {
        let config = CorsConfig::default()
            .with_allowed_origins(["https://eser.dev"])
            .with_allowed_headers(["Content-Type", "Authorization"])
            .with_allowed_methods(["GET", "POST"]);
        let engine = Arc::new(CorsTrustEngine::new(registry, Arc::new(config)).unwrap());

        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(from_fn_with_state(engine, cors_trust::<Registry>))
    }

    fn registry() -> Arc<Registry> {
        registry_with_capacity(64)
    }

    fn registry_with_capacity(capacity: usize) -> Arc<Registry> {
        let cached =
            CachedDomainRegistry::new(MemoryDomainRegistry::new(), Duration::from_secs(60), capacity);
        cached.inner().register("customtenant.com", "tenant");
        Arc::new(cached)
    }

    fn request(method: Method, origin: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri("/ping");
        if let Some(origin) = origin {
            builder = builder.header(ORIGIN, origin);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_static_origin_is_echoed() {
        let response = app(registry())
            .oneshot(request(Method::GET, Some("https://eser.dev")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://eser.dev");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type, Authorization");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "GET, POST");
    }

    #[tokio::test]
    async fn test_custom_domain_with_www_is_allowed() {
        let response = app(registry())
            .oneshot(request(Method::GET, Some("https://www.customtenant.com")))
            .await
            .unwrap();

        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://www.customtenant.com"
        );
    }

    #[tokio::test]
    async fn test_subdomain_of_custom_domain_is_allowed() {
        let response = app(registry())
            .oneshot(request(Method::GET, Some("https://app.customtenant.com")))
            .await
            .unwrap();

        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.customtenant.com"
        );
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn test_unknown_origin_gets_no_headers_but_continues() {
        let response = app(registry())
            .oneshot(request(Method::GET, Some("https://evil.example")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert!(response.headers().get(ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }

    #[tokio::test]
    async fn test_missing_origin_is_untouched() {
        let registry = registry();
        let response = app(registry.clone())
            .oneshot(request(Method::GET, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert_eq!(registry.inner().lookups(), 0);
    }

    #[tokio::test]
    async fn test_preflight_short_circuits() {
        let allowed = app(registry())
            .oneshot(request(Method::OPTIONS, Some("https://eser.dev")))
            .await
            .unwrap();
        assert_eq!(allowed.status(), StatusCode::NO_CONTENT);
        assert_eq!(allowed.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "https://eser.dev");

        let denied = app(registry())
            .oneshot(request(Method::OPTIONS, Some("https://evil.example")))
            .await
            .unwrap();
        assert_eq!(denied.status(), StatusCode::NO_CONTENT);
        assert!(denied.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_registry_failure_denies_without_failing_request() {
        let registry = registry();
        registry.inner().fail(true);

        let response = app(registry)
            .oneshot(request(Method::GET, Some("https://customtenant.com")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_custom_domain_lookups_are_cached() {
        let registry = registry();
        let app = app(registry.clone());

        for _ in 0..3 {
            app.clone()
                .oneshot(request(Method::GET, Some("https://customtenant.com")))
                .await
                .unwrap();
        }

        assert_eq!(registry.inner().lookups(), 1);
    }

    #[tokio::test]
    async fn test_distinct_origins_do_not_grow_cache_past_capacity() {
        let registry = registry_with_capacity(32);
        let app = app(registry.clone());

        for i in 0..2000 {
            let origin = format!("https://attacker-{i}.example");
            let response = app
                .clone()
                .oneshot(request(Method::GET, Some(&origin)))
                .await
                .unwrap();
            assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        }

        assert_eq!(registry.len(), 32);
    }
}
