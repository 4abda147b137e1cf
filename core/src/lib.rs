//! Domain layer for EventSphere.
//!
//! A campus event-listing and registration service: users browse and register
//! for events, event managers create and manage the events they organize.
//! This crate holds everything below HTTP:
//!
//! - [`model`] — entities, identifiers and enums
//! - [`error`] — the [`DomainError`] taxonomy with stable error codes
//! - [`store`] — the in-memory [`MemoryStore`] (process-lifetime only)
//! - [`session`] — TTL'd server-side sessions
//! - [`password`] — salted hashing with constant-time verification
//! - [`registration`] — the registration workflow and its invariants
//! - [`query`] — pure event filters backing the listing endpoints
//!
//! The web crate (`eventsphere-web`) wires these into an axum application.

pub mod error;
pub mod model;
pub mod password;
pub mod query;
pub mod registration;
pub mod session;
pub mod store;

// Re-export key types for convenience
pub use error::{DomainError, Result};
pub use model::{
    Event, EventCategory, EventId, EventPatch, EventType, NewEvent, NewUser, Notification,
    NotificationId, Registration, RegistrationId, RegistrationPatch, Role, User, UserId, UserPatch,
};
pub use registration::RegistrationService;
pub use session::{Session, SessionId, SessionStore};
pub use store::MemoryStore;
