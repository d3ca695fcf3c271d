//! Auth Router

use axum::{Router, middleware::from_fn_with_state, routing::get};
use std::sync::Arc;

use crate::application::{AccessController, SessionResolver};
use crate::domain::repository::{MembershipLookup, SessionStore};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{SessionLayerState, require_authenticated, resolve_session};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    resolver: Arc<SessionResolver<PgAuthRepository>>,
    access: AccessController<PgAuthRepository>,
) -> Router {
    auth_router_generic(resolver, access)
}

/// Create a generic Auth router for any store implementation
pub fn auth_router_generic<S, M>(
    resolver: Arc<SessionResolver<S>>,
    access: AccessController<M>,
) -> Router
where
    S: SessionStore + Send + Sync + 'static,
    M: MembershipLookup + Send + Sync + 'static,
{
    let layer_state = SessionLayerState::new(resolver);
    let state = AuthAppState { access };

    Router::new()
        .route(
            "/session",
            get(handlers::session_status)
                .route_layer(from_fn_with_state(layer_state.clone(), resolve_session::<S>)),
        )
        .route(
            "/access/{slug}",
            get(handlers::check_access::<M>).route_layer(from_fn_with_state(
                layer_state.clone(),
                require_authenticated::<S>,
            )),
        )
        .route(
            "/authorize/{slug}",
            get(handlers::authorize_access::<M>)
                .route_layer(from_fn_with_state(layer_state, require_authenticated::<S>)),
        )
        .with_state(state)
}
