//! Application Layer
//!
//! Use cases and application services.

pub mod access_control;
pub mod config;
pub mod credential;
pub mod resolve_session;

// Re-exports
pub use access_control::AccessController;
pub use config::{ActivityUpdateMode, AuthConfig};
pub use credential::{
    CookieCredential, Credential, CredentialChain, CredentialSource, LegacyBearerCredential,
    RequestCredentials, TokenKind,
};
pub use resolve_session::{ResolvedSession, SessionRequirement, SessionResolver};
