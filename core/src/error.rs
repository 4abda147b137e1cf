//! Error taxonomy for domain operations.

use thiserror::Error;

/// Result type alias for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Error taxonomy covering every failure mode of the domain layer.
///
/// Each variant carries a stable machine-readable [`code`](DomainError::code)
/// so clients can branch on error kinds instead of parsing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ═══════════════════════════════════════════════════════════
    // Validation Errors
    // ═══════════════════════════════════════════════════════════
    /// Malformed or missing input fields.
    #[error("{0}")]
    Validation(String),

    /// Username is already taken by another user.
    #[error("Username already exists")]
    UsernameTaken,

    /// Email is already taken by another user.
    #[error("Email already exists")]
    EmailTaken,

    // ═══════════════════════════════════════════════════════════
    // Not-Found Errors
    // ═══════════════════════════════════════════════════════════
    /// A referenced entity does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Entity kind, e.g. "Event" or "User".
        resource: &'static str,
    },

    // ═══════════════════════════════════════════════════════════
    // Business-Rule Violations
    // ═══════════════════════════════════════════════════════════
    /// The user already holds a registration for this event.
    #[error("Already registered for this event")]
    AlreadyRegistered,

    /// The event has no remaining capacity.
    #[error("Event capacity reached")]
    CapacityReached,

    /// The event is paid and the registration carries no payment.
    #[error("Payment required for this event")]
    PaymentRequired,

    // ═══════════════════════════════════════════════════════════
    // Authentication & Authorization
    // ═══════════════════════════════════════════════════════════
    /// Credentials did not match. Deliberately identical for unknown
    /// usernames and wrong passwords.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No session exists for the presented identifier.
    #[error("Session not found")]
    SessionNotFound,

    /// The session exists but its time-to-live has elapsed.
    #[error("Session has expired")]
    SessionExpired,

    /// The authenticated user lacks permission for this operation.
    #[error("Forbidden")]
    Forbidden,

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════
    /// Internal failure (should not be exposed to users verbatim).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Shorthand for [`DomainError::NotFound`].
    #[must_use]
    pub const fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::CapacityReached => "CAPACITY_REACHED",
            Self::PaymentRequired => "PAYMENT_REQUIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::SessionNotFound | Self::SessionExpired => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Returns `true` if this error is due to invalid user input rather
    /// than a system failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            DomainError::AlreadyRegistered.to_string(),
            "Already registered for this event"
        );
        assert_eq!(
            DomainError::not_found("Event").to_string(),
            "Event not found"
        );
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(DomainError::CapacityReached.code(), "CAPACITY_REACHED");
        assert_eq!(DomainError::PaymentRequired.code(), "PAYMENT_REQUIRED");
        assert_eq!(DomainError::SessionExpired.code(), "UNAUTHORIZED");
    }

    #[test]
    fn internal_is_not_user_error() {
        assert!(!DomainError::Internal("lock poisoned".to_string()).is_user_error());
        assert!(DomainError::InvalidCredentials.is_user_error());
    }
}
