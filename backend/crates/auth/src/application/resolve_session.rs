//! Resolve Session Use Case
//!
//! Turns request credentials into a validated session or a rejection.
//! Every rejection is the same `Unauthorized`; the reason is only logged.

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use kernel::id::UserId;
use std::sync::Arc;

use platform::client::extract_user_agent;
use platform::detached::spawn_detached;

use crate::application::config::{ActivityUpdateMode, AuthConfig};
use crate::application::credential::{CredentialChain, RequestCredentials, TokenKind};
use crate::domain::entity::SessionActivity;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::SessionToken;
use crate::error::{AuthError, AuthResult};

/// What a route demands of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequirement {
    /// Any active session, anonymous included
    AnySession,
    /// Active session with a logged-in user
    Authenticated,
}

/// A session that passed resolution for the current request
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub session_id: SessionToken,
    pub user_id: Option<UserId>,
    pub last_activity_at: DateTime<Utc>,
    pub token_kind: TokenKind,
}

impl ResolvedSession {
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Session resolver
pub struct SessionResolver<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
    credentials: CredentialChain,
}

impl<S> SessionResolver<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        let credentials = CredentialChain::from_config(&config);
        Self {
            store,
            config,
            credentials,
        }
    }

    /// Swap the credential strategies
    pub fn with_credentials(mut self, credentials: CredentialChain) -> Self {
        self.credentials = credentials;
        self
    }

    /// Collect credentials and the user agent from request headers
    pub fn credentials_from(&self, headers: &HeaderMap) -> RequestCredentials {
        RequestCredentials {
            credential: self.credentials.extract(headers),
            user_agent: extract_user_agent(headers),
        }
    }

    /// Resolve a session
    ///
    /// On success the activity metadata is refreshed; a failing refresh is
    /// logged and never fails the request.
    pub async fn resolve(
        &self,
        request: &RequestCredentials,
        requirement: SessionRequirement,
    ) -> AuthResult<ResolvedSession> {
        let Some(credential) = &request.credential else {
            tracing::debug!("No session credential presented");
            return Err(AuthError::Unauthorized);
        };
        let token_kind = credential.kind.as_str();

        let session = match self.store.get_by_id(&credential.token).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                tracing::debug!(token_kind, "Session not found");
                return Err(AuthError::Unauthorized);
            }
            Err(e) => {
                tracing::error!(token_kind, error = %e, "Session lookup failed");
                return Err(AuthError::Unauthorized);
            }
        };

        let now = Utc::now();
        if !session.is_active_at(now) {
            tracing::debug!(token_kind, status = %session.status, "Session not active");
            return Err(AuthError::Unauthorized);
        }

        if requirement == SessionRequirement::Authenticated && session.is_anonymous() {
            tracing::debug!(token_kind, "Anonymous session on authenticated route");
            return Err(AuthError::Unauthorized);
        }

        let activity = SessionActivity {
            last_activity_at: now,
            user_agent: request.user_agent.clone(),
        };
        self.record_activity(credential.token.clone(), activity, credential.kind)
            .await;

        Ok(ResolvedSession {
            session_id: session.id,
            user_id: session.logged_in_user_id,
            last_activity_at: now,
            token_kind: credential.kind,
        })
    }

    async fn record_activity(
        &self,
        token: SessionToken,
        activity: SessionActivity,
        kind: TokenKind,
    ) {
        match self.config.activity_update {
            ActivityUpdateMode::Detached => {
                let store = self.store.clone();
                spawn_detached("session-activity", async move {
                    store.update_activity(&token, &activity).await
                });
            }
            ActivityUpdateMode::Inline => {
                if let Err(e) = self.store.update_activity(&token, &activity).await {
                    tracing::warn!(
                        token_kind = kind.as_str(),
                        error = %e,
                        "Failed to update session activity"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::credential::Credential;
    use crate::domain::entity::Session;
    use crate::domain::value_object::SessionStatus;
    use crate::infra::memory::MemorySessionStore;
    use chrono::Duration;

    fn session(id: &str, status: SessionStatus, user: Option<UserId>) -> Session {
        let now = Utc::now();
        Session {
            id: SessionToken::parse(id).unwrap(),
            status,
            logged_in_user_id: user,
            last_activity_at: now - Duration::minutes(30),
            user_agent: None,
            expires_at: now + Duration::hours(1),
            created_at: now - Duration::hours(1),
        }
    }

    fn cookie(id: &str) -> RequestCredentials {
        RequestCredentials {
            credential: Some(Credential {
                token: SessionToken::parse(id).unwrap(),
                kind: TokenKind::Cookie,
            }),
            user_agent: Some("test-agent/1.0".to_string()),
        }
    }

    fn resolver(store: Arc<MemorySessionStore>) -> SessionResolver<MemorySessionStore> {
        let config = AuthConfig::default().with_activity_update(ActivityUpdateMode::Inline);
        SessionResolver::new(store, Arc::new(config))
    }

    #[tokio::test]
    async fn test_missing_credential_is_unauthorized() {
        let resolver = resolver(Arc::new(MemorySessionStore::new()));
        let result = resolver
            .resolve(&RequestCredentials::default(), SessionRequirement::AnySession)
            .await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_unknown_session_is_unauthorized() {
        let resolver = resolver(Arc::new(MemorySessionStore::new()));
        let result = resolver
            .resolve(&cookie("nope"), SessionRequirement::AnySession)
            .await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_non_active_sessions_never_resolve() {
        let store = Arc::new(MemorySessionStore::new());
        store.insert(session("revoked", SessionStatus::Revoked, Some(UserId::new())));
        store.insert(session("expired", SessionStatus::Expired, Some(UserId::new())));
        let resolver = resolver(store);

        for id in ["revoked", "expired"] {
            let result = resolver
                .resolve(&cookie(id), SessionRequirement::AnySession)
                .await;
            assert!(matches!(result, Err(AuthError::Unauthorized)), "{id}");
        }
    }

    #[tokio::test]
    async fn test_lapsed_active_session_is_unauthorized() {
        let store = Arc::new(MemorySessionStore::new());
        let mut lapsed = session("lapsed", SessionStatus::Active, Some(UserId::new()));
        lapsed.expires_at = Utc::now() - Duration::seconds(1);
        store.insert(lapsed);

        let result = resolver(store)
            .resolve(&cookie("lapsed"), SessionRequirement::AnySession)
            .await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_anonymous_session() {
        let store = Arc::new(MemorySessionStore::new());
        store.insert(session("anon", SessionStatus::Active, None));
        let resolver = resolver(store);

        let resolved = resolver
            .resolve(&cookie("anon"), SessionRequirement::AnySession)
            .await
            .unwrap();
        assert!(!resolved.is_authenticated());

        let result = resolver
            .resolve(&cookie("anon"), SessionRequirement::Authenticated)
            .await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_store_failure_is_unauthorized() {
        let store = Arc::new(MemorySessionStore::new());
        store.insert(session("s1", SessionStatus::Active, Some(UserId::new())));
        store.fail_reads(true);

        let result = resolver(store)
            .resolve(&cookie("s1"), SessionRequirement::AnySession)
            .await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_activity_is_recorded_without_touching_identity() {
        let store = Arc::new(MemorySessionStore::new());
        let user = UserId::new();
        let before = session("s1", SessionStatus::Active, Some(user));
        let old_activity = before.last_activity_at;
        store.insert(before);

        let resolved = resolver(store.clone())
            .resolve(&cookie("s1"), SessionRequirement::Authenticated)
            .await
            .unwrap();
        assert_eq!(resolved.user_id, Some(user));

        let after = store.get(&SessionToken::parse("s1").unwrap()).unwrap();
        assert!(after.last_activity_at > old_activity);
        assert_eq!(after.user_agent.as_deref(), Some("test-agent/1.0"));
        assert_eq!(after.status, SessionStatus::Active);
        assert_eq!(after.logged_in_user_id, Some(user));
    }

    #[tokio::test]
    async fn test_activity_failure_does_not_fail_request() {
        let store = Arc::new(MemorySessionStore::new());
        store.insert(session("s1", SessionStatus::Active, Some(UserId::new())));
        store.fail_writes(true);

        let result = resolver(store.clone())
            .resolve(&cookie("s1"), SessionRequirement::Authenticated)
            .await;
        assert!(result.is_ok());

        let detached = SessionResolver::new(store, Arc::new(AuthConfig::default()));
        let result = detached
            .resolve(&cookie("s1"), SessionRequirement::Authenticated)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_credentials_from_headers() {
        use axum::http::{HeaderValue, header};

        let resolver = resolver(Arc::new(MemorySessionStore::new()));
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_id=abc"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static("ua/2"));

        let creds = resolver.credentials_from(&headers);
        assert_eq!(creds.credential.unwrap().token.as_str(), "abc");
        assert_eq!(creds.user_agent.as_deref(), Some("ua/2"));
    }
}
