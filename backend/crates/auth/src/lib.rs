//! Auth (Session Resolution & Access Control) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entity, value objects, repository traits
//! - `application/` - Session resolver, credential strategies, access controller
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - Middleware, extractors, handlers, router
//!
//! ## Features
//! - Cookie-based session resolution, with an optional legacy bearer JWT path
//! - Anonymous vs. authenticated route requirements
//! - Rank-based access checks (Viewer < Member < Maintainer < Owner)
//! - Fire-and-forget activity tracking
//!
//! ## Security Model
//! - Every rejection is the same generic `401`; reasons stay in server logs
//! - Only `Active`, unexpired sessions resolve
//! - Membership lookup failures surface as internal errors, never as denials

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    AccessController, ActivityUpdateMode, AuthConfig, ResolvedSession, SessionRequirement,
    SessionResolver,
};
pub use domain::value_object::{MembershipRank, ResourceSlug};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;
pub use presentation::AuthenticatedUser;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
