//! API route handlers.
//!
//! Each module covers one resource and defines its request/response types
//! next to the handlers that use them.

pub mod analytics;
pub mod auth;
pub mod events;
pub mod notifications;
pub mod registrations;
pub mod users;

use serde::Serialize;

/// Generic `{ "message": ... }` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome message.
    pub message: String,
}

impl MessageResponse {
    /// Build a message response.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
