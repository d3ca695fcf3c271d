//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::AuthenticatedUser;
pub use handlers::AuthAppState;
pub use middleware::{SessionLayerState, require_authenticated, resolve_session};
pub use router::{auth_router, auth_router_generic};
