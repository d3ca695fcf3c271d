//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::crypto::SecretKey;

/// How the resolver writes activity metadata back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityUpdateMode {
    /// Spawn a detached task; the request never waits
    #[default]
    Detached,
    /// Await the update before continuing; failures are still swallowed
    Inline,
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// HS256 secret for legacy bearer tokens; `None` disables that path
    pub legacy_jwt_secret: Option<SecretKey>,
    pub activity_update: ActivityUpdateMode,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_id".to_string(),
            legacy_jwt_secret: None,
            activity_update: ActivityUpdateMode::Detached,
        }
    }
}

impl AuthConfig {
    /// Create config for development (random legacy secret)
    pub fn development() -> Self {
        Self {
            legacy_jwt_secret: Some(SecretKey::random(32)),
            ..Self::default()
        }
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session_cookie_name = name.into();
        self
    }

    pub fn with_legacy_jwt_secret(mut self, secret: SecretKey) -> Self {
        self.legacy_jwt_secret = Some(secret);
        self
    }

    pub fn with_activity_update(mut self, mode: ActivityUpdateMode) -> Self {
        self.activity_update = mode;
        self
    }

    pub fn legacy_bearer_enabled(&self) -> bool {
        self.legacy_jwt_secret.is_some()
    }
}
