//! Axum HTTP server for EventSphere.
//!
//! The imperative shell over `eventsphere-core`: request parsing, session
//! cookies, auth guards, JSON responses and error mapping live here; the
//! domain rules live in the core crate.
//!
//! # Request Flow
//!
//! 1. **HTTP request** arrives at an Axum handler
//! 2. **Guards** resolve the session cookie ([`extract::SessionUser`],
//!    [`extract::RequireEventManager`])
//! 3. **Handlers** call the store or the registration workflow
//! 4. **Errors** map to JSON `{code, message}` bodies via [`error::AppError`]

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use router::build_router;
pub use state::AppState;
