//! Auth Middleware
//!
//! Session resolution for routes. Results travel to handlers only through
//! the current request's extensions.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::{ResolvedSession, SessionRequirement, SessionResolver};
use crate::domain::repository::SessionStore;
use crate::error::AuthError;
use crate::presentation::extract::AuthenticatedUser;

/// Middleware state
pub struct SessionLayerState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    pub resolver: Arc<SessionResolver<S>>,
}

impl<S> Clone for SessionLayerState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
        }
    }
}

impl<S> SessionLayerState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    pub fn new(resolver: Arc<SessionResolver<S>>) -> Self {
        Self { resolver }
    }
}

/// Middleware that resolves a session when one is presented
///
/// Never rejects. A valid session (anonymous included) is stored as
/// [`ResolvedSession`]; otherwise the request continues without one.
pub async fn resolve_session<S>(
    State(state): State<SessionLayerState<S>>,
    mut req: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
{
    if req.extensions().get::<ResolvedSession>().is_none() {
        let credentials = state.resolver.credentials_from(req.headers());
        if let Ok(session) = state
            .resolver
            .resolve(&credentials, SessionRequirement::AnySession)
            .await
        {
            req.extensions_mut().insert(session);
        }
    }

    next.run(req).await
}

/// Middleware that requires a logged-in user
///
/// Responds `401` with `X-Auth-Required: true` when no authenticated session
/// can be resolved. A session already placed by [`resolve_session`] is
/// reused, so an anonymous one is rejected without another store call. On
/// success both [`ResolvedSession`] and [`AuthenticatedUser`] are available
/// to the handler.
pub async fn require_authenticated<S>(
    State(state): State<SessionLayerState<S>>,
    mut req: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
{
    let already_resolved = req.extensions().get::<ResolvedSession>().cloned();

    let session = match already_resolved {
        Some(session) if session.is_authenticated() => session,
        Some(_) => {
            tracing::debug!("Anonymous session on an authenticated route");
            return AuthError::Unauthorized.into_response();
        }
        None => {
            let credentials = state.resolver.credentials_from(req.headers());
            match state
                .resolver
                .resolve(&credentials, SessionRequirement::Authenticated)
                .await
            {
                Ok(session) => session,
                Err(e) => return e.into_response(),
            }
        }
    };

    if let Some(user_id) = session.user_id {
        req.extensions_mut().insert(AuthenticatedUser(user_id));
    }
    req.extensions_mut().insert(session);

    next.run(req).await
}
