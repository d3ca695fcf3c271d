//! CORS Middleware
//!
//! Meant to sit outermost so every response, errors included, passes
//! through it.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use platform::client::extract_origin;
use std::sync::Arc;

use crate::application::CorsTrustEngine;
use crate::domain::CustomDomainRegistry;

/// Decide the origin, answer preflights, decorate everything else
///
/// Preflight (`OPTIONS`) always gets `204`; untrusted origins just get no
/// CORS headers. Other requests always reach the inner service.
pub async fn cors_trust<R>(
    State(engine): State<Arc<CorsTrustEngine<R>>>,
    req: Request,
    next: Next,
) -> Response
where
    R: CustomDomainRegistry + Send + Sync + 'static,
{
    let origin = extract_origin(req.headers());
    let decision = engine.decide(origin.as_deref()).await;

    let mut response = if req.method() == Method::OPTIONS {
        let mut preflight = Response::new(Body::empty());
        *preflight.status_mut() = StatusCode::NO_CONTENT;
        preflight
    } else {
        next.run(req).await
    };

    engine.apply(&decision, response.headers_mut());
    response
}
