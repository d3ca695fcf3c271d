//! PoW Middleware

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::domain::repository::ChallengeStore;
use crate::presentation::handlers::PowAppState;

pub const POW_TOKEN_HEADER: &str = "x-pow-token";
pub const POW_SOLUTION_HEADER: &str = "x-pow-solution";
/// Set on every gate rejection
pub const POW_REQUIRED_HEADER: &str = "x-pow-required";

/// Middleware that requires a solved challenge on the request itself
///
/// Reads `X-PoW-Token` and `X-PoW-Solution`. The challenge is consumed
/// before the inner handler runs. Passes through when PoW is disabled.
///
/// No route in this workspace is gated; downstream services mount it with
/// `route_layer(from_fn_with_state(PowAppState::new(service), require_pow_solution::<C>))`
/// on the endpoints they want to protect.
pub async fn require_pow_solution<C>(
    State(state): State<PowAppState<C>>,
    req: Request,
    next: Next,
) -> Response
where
    C: ChallengeStore + Send + Sync + 'static,
{
    if !state.service.is_enabled() {
        return next.run(req).await;
    }

    let token = header_str(req.headers(), POW_TOKEN_HEADER);
    let solution = header_str(req.headers(), POW_SOLUTION_HEADER);

    if let Err(e) = state.service.verify(&token, &solution).await {
        let rejected = e.is_rejection();
        let mut response = e.into_response();
        if rejected {
            response.headers_mut().insert(
                HeaderName::from_static(POW_REQUIRED_HEADER),
                HeaderValue::from_static("true"),
            );
        }
        return response;
    }

    next.run(req).await
}

fn header_str(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
