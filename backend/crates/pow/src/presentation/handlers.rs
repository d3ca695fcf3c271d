//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use platform::client::ClientOrigin;
use std::sync::Arc;

use crate::application::PowChallengeService;
use crate::domain::repository::ChallengeStore;
use crate::error::PowResult;
use crate::presentation::dto::{ChallengeResponse, VerifyRequest};

/// Shared state for PoW handlers and the gate middleware
pub struct PowAppState<C>
where
    C: ChallengeStore + Send + Sync + 'static,
{
    pub service: Arc<PowChallengeService<C>>,
}

impl<C> Clone for PowAppState<C>
where
    C: ChallengeStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<C> PowAppState<C>
where
    C: ChallengeStore + Send + Sync + 'static,
{
    pub fn new(service: Arc<PowChallengeService<C>>) -> Self {
        Self { service }
    }
}

/// GET /api/pow/challenge
pub async fn issue_challenge<C>(
    State(state): State<PowAppState<C>>,
    origin: ClientOrigin,
) -> PowResult<Json<ChallengeResponse>>
where
    C: ChallengeStore + Send + Sync + 'static,
{
    let outcome = state.service.issue(origin.ip).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/pow/verify
pub async fn verify_solution<C>(
    State(state): State<PowAppState<C>>,
    Json(req): Json<VerifyRequest>,
) -> PowResult<StatusCode>
where
    C: ChallengeStore + Send + Sync + 'static,
{
    state.service.verify(&req.token, &req.solution).await?;
    Ok(StatusCode::NO_CONTENT)
}
