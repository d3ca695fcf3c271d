//! Credential Sources
//!
//! Where a session token comes from. The designated cookie is primary; a
//! legacy `Authorization: Bearer` JWT carrying a `session_id` claim is
//! accepted when a signing secret is configured. Sources are tried in order
//! and the first one that yields a token wins.

use axum::http::HeaderMap;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

use platform::cookie::{extract_bearer, extract_cookie};
use platform::crypto::SecretKey;

use crate::application::config::AuthConfig;
use crate::domain::value_object::SessionToken;

/// Which strategy produced a token (logged as `token_kind`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Cookie,
    LegacyBearer,
}

impl TokenKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Cookie => "cookie",
            TokenKind::LegacyBearer => "legacy_bearer",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token together with the strategy that found it
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: SessionToken,
    pub kind: TokenKind,
}

/// Everything the resolver needs from a request
#[derive(Debug, Clone, Default)]
pub struct RequestCredentials {
    pub credential: Option<Credential>,
    pub user_agent: Option<String>,
}

/// One way of finding a session token in request headers
pub trait CredentialSource: Send + Sync {
    fn kind(&self) -> TokenKind;

    /// `None` means this source has nothing usable
    fn extract(&self, headers: &HeaderMap) -> Option<SessionToken>;
}

/// Session token from a named cookie
#[derive(Debug, Clone)]
pub struct CookieCredential {
    cookie_name: String,
}

impl CookieCredential {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }
}

impl CredentialSource for CookieCredential {
    fn kind(&self) -> TokenKind {
        TokenKind::Cookie
    }

    fn extract(&self, headers: &HeaderMap) -> Option<SessionToken> {
        extract_cookie(headers, &self.cookie_name).and_then(|raw| SessionToken::parse(&raw))
    }
}

#[derive(Debug, Deserialize)]
struct LegacyClaims {
    session_id: Option<String>,
}

/// Session token from an HS256 bearer JWT
///
/// Bad signatures, malformed tokens and a missing `session_id` claim all
/// yield no token. `exp` is enforced only when the token carries one.
pub struct LegacyBearerCredential {
    key: DecodingKey,
    validation: Validation,
}

impl LegacyBearerCredential {
    pub fn new(secret: &SecretKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.expose()),
            validation,
        }
    }
}

impl CredentialSource for LegacyBearerCredential {
    fn kind(&self) -> TokenKind {
        TokenKind::LegacyBearer
    }

    fn extract(&self, headers: &HeaderMap) -> Option<SessionToken> {
        let jwt = extract_bearer(headers)?;

        let claims = match decode::<LegacyClaims>(&jwt, &self.key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(token_kind = "legacy_bearer", error = %e, "Bearer token rejected");
                return None;
            }
        };

        claims.session_id.as_deref().and_then(SessionToken::parse)
    }
}

/// Ordered list of credential sources
pub struct CredentialChain {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialChain {
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    /// Cookie first, then the legacy bearer path if a secret is configured
    pub fn from_config(config: &AuthConfig) -> Self {
        let mut sources: Vec<Box<dyn CredentialSource>> =
            vec![Box::new(CookieCredential::new(&config.session_cookie_name))];
        if let Some(secret) = &config.legacy_jwt_secret {
            sources.push(Box::new(LegacyBearerCredential::new(secret)));
        }
        Self::new(sources)
    }

    pub fn extract(&self, headers: &HeaderMap) -> Option<Credential> {
        self.sources.iter().find_map(|source| {
            source.extract(headers).map(|token| Credential {
                token,
                kind: source.kind(),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
