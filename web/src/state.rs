//! Application state for the EventSphere HTTP server.
//!
//! Contains all shared resources needed by HTTP handlers. Everything is
//! constructed explicitly in `main` and injected here — there are no
//! global singletons.

use chrono::Duration;
use eventsphere_core::{MemoryStore, RegistrationService, SessionStore};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via `Arc`) for each request.
#[derive(Clone)]
pub struct AppState {
    /// In-memory entity storage.
    pub store: Arc<MemoryStore>,

    /// Server-side session storage.
    pub sessions: Arc<SessionStore>,

    /// Registration workflow over `store`.
    pub registration: Arc<RegistrationService>,

    /// Session time-to-live applied at login.
    pub session_ttl: Duration,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        store: Arc<MemoryStore>,
        sessions: Arc<SessionStore>,
        registration: Arc<RegistrationService>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            store,
            sessions,
            registration,
            session_ttl,
        }
    }
}
