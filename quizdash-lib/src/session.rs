//! Session context and credential provider
//!
//! The session is an explicit object with an explicit lifecycle: created
//! at login, revoked at logout. Nothing reads a token out of ambient
//! storage; the HTTP client asks its [`CredentialProvider`] on every
//! request.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::SessionError;

/// Dashboard role carried by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

/// An authenticated session.
///
/// Holds the bearer credential and the metadata views key their behavior
/// on (role-gated dashboards). Created from the backend's login response.
///
/// # Example
///
/// ```
/// use quizdash_lib::session::{Role, Session};
///
/// let session = Session::new("token-from-login", Role::Instructor);
/// assert!(!session.is_expired());
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    token: String,
    role: Role,
    issued_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session with no known expiry.
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            token: token.into(),
            role,
            issued_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Creates a session that expires at a known time.
    pub fn with_expiry(token: impl Into<String>, role: Role, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            token: token.into(),
            role,
            issued_at: Utc::now(),
            expires_at: Some(expires_at),
        }
    }

    /// Returns the session's unique id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the bearer credential.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the session's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns when the session was created.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns `true` if the session has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns `true` if the session will expire within the given duration.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn expires_within(&self, duration: chrono::Duration) -> bool {
        self.expires_at
            .is_some_and(|exp| Utc::now() + duration >= exp)
    }
}

/// Trait for providing the current bearer credential to the client.
///
/// The client calls [`credentials`](CredentialProvider::credentials)
/// before each request. `Ok(None)` means "no session" - the request goes
/// out unauthenticated (public endpoints); an expired session is an error
/// surfaced before any network traffic happens.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the bearer credential to attach, if any.
    async fn credentials(&self) -> Result<Option<String>, SessionError>;
}

/// Shared, thread-safe slot holding the current session.
///
/// Cheap to clone; all clones observe the same session. `install` at
/// login, `revoke` at logout.
///
/// # Example
///
/// ```ignore
/// let store = SessionStore::new();
/// store.install(Session::new("tok", Role::Admin)).await;
/// assert!(store.is_authenticated().await);
/// store.revoke().await;
/// assert!(!store.is_authenticated().await);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// Creates an empty store (no active session).
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a session, replacing any previous one.
    pub async fn install(&self, session: Session) {
        let mut slot = self.inner.write().await;
        *slot = Some(session);
    }

    /// Returns a copy of the current session, if any.
    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    /// Returns the current session or [`SessionError::Missing`].
    pub async fn require(&self) -> Result<Session, SessionError> {
        self.current().await.ok_or(SessionError::Missing)
    }

    /// Returns `true` while a session is installed.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Drops the current session (logout).
    pub async fn revoke(&self) {
        let mut slot = self.inner.write().await;
        *slot = None;
    }
}

#[async_trait]
impl CredentialProvider for SessionStore {
    async fn credentials(&self) -> Result<Option<String>, SessionError> {
        match &*self.inner.read().await {
            None => Ok(None),
            Some(session) if session.is_expired() => Err(SessionError::Expired),
            Some(session) => Ok(Some(session.token().to_string())),
        }
    }
}

/// A provider that always returns the same static credential.
///
/// Useful for tests or long-lived service tokens.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    token: String,
}

impl StaticCredentialProvider {
    /// Creates a provider around a fixed credential.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn credentials(&self) -> Result<Option<String>, SessionError> {
        Ok(Some(self.token.clone()))
    }
}
