//! Request Extractors
//!
//! Read what the session middleware stored on the current request.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use kernel::id::UserId;
use std::convert::Infallible;

use crate::application::ResolvedSession;
use crate::error::AuthError;

/// Logged-in user of the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl<S> FromRequestParts<S> for ResolvedSession
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ResolvedSession>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}

impl<S> OptionalFromRequestParts<S> for ResolvedSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<ResolvedSession>().cloned())
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(*user);
        }
        parts
            .extensions
            .get::<ResolvedSession>()
            .and_then(|session| session.user_id)
            .map(AuthenticatedUser)
            .ok_or(AuthError::Unauthorized)
    }
}
