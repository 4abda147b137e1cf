//! Server-side sessions.
//!
//! Sessions are ephemeral records with a fixed time-to-live (24 hours by
//! default), keyed by a random identifier that the web layer delivers via an
//! HTTP-only cookie. There is no signing secret: the identifier itself is an
//! unguessable UUIDv4.

use crate::error::{DomainError, Result};
use crate::model::UserId;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random `SessionId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session id from its cookie string form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An authenticated session bound to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Unique session identifier (the cookie value).
    pub session_id: SessionId,
    /// The authenticated user.
    pub user_id: UserId,
    /// Session creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Fixed expiration timestamp; not refreshed on access.
    pub expires_at: DateTime<Utc>,
}

fn lock(
    mutex: &Mutex<HashMap<SessionId, Session>>,
) -> Result<MutexGuard<'_, HashMap<SessionId, Session>>> {
    mutex
        .lock()
        .map_err(|_| DomainError::Internal("session mutex poisoned".to_string()))
}

/// In-memory session store.
///
/// Expired entries are dropped lazily on access; the server also runs a
/// periodic [`purge_expired`](SessionStore::purge_expired) sweep.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl SessionStore {
    /// Create an empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish a new session for `user_id` with the given time-to-live.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session lock is poisoned.
    pub async fn create(&self, user_id: UserId, ttl: Duration) -> Result<Session> {
        let now = Utc::now();
        let session = Session {
            session_id: SessionId::new(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
        };
        lock(&self.sessions)?.insert(session.session_id, session.clone());
        Ok(session)
    }

    /// Resolve a session id to its session.
    ///
    /// # Errors
    ///
    /// - [`DomainError::SessionNotFound`] if no session exists for the id
    /// - [`DomainError::SessionExpired`] if the session's TTL has elapsed
    ///   (the entry is removed)
    pub async fn get(&self, session_id: SessionId) -> Result<Session> {
        let mut sessions = lock(&self.sessions)?;
        let session = sessions
            .get(&session_id)
            .cloned()
            .ok_or(DomainError::SessionNotFound)?;
        if session.expires_at < Utc::now() {
            sessions.remove(&session_id);
            return Err(DomainError::SessionExpired);
        }
        Ok(session)
    }

    /// Destroy a session. Succeeds whether or not the session existed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session lock is poisoned.
    pub async fn delete(&self, session_id: SessionId) -> Result<()> {
        lock(&self.sessions)?.remove(&session_id);
        Ok(())
    }

    /// Drop all expired sessions, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session lock is poisoned.
    pub async fn purge_expired(&self) -> Result<usize> {
        let mut sessions = lock(&self.sessions)?;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at >= now);
        Ok(before - sessions.len())
    }

    /// Count of stored sessions (for tests).
    ///
    /// # Errors
    ///
    /// Returns an error only if the session lock is poisoned.
    pub async fn session_count(&self) -> Result<usize> {
        Ok(lock(&self.sessions)?.len())
    }
}
