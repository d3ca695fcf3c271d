//! PoW Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::PowChallengeService;
use crate::domain::repository::ChallengeStore;
use crate::infra::postgres::PgChallengeStore;
use crate::presentation::handlers::{self, PowAppState};

/// Create the PoW router with PostgreSQL store
pub fn pow_router(service: Arc<PowChallengeService<PgChallengeStore>>) -> Router {
    pow_router_generic(service)
}

/// Create a generic PoW router for any store implementation
pub fn pow_router_generic<C>(service: Arc<PowChallengeService<C>>) -> Router
where
    C: ChallengeStore + Send + Sync + 'static,
{
    Router::new()
        .route("/challenge", get(handlers::issue_challenge::<C>))
        .route("/verify", post(handlers::verify_solution::<C>))
        .with_state(PowAppState::new(service))
}
