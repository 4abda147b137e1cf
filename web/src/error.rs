//! Error types for web handlers.
//!
//! This module bridges between [`DomainError`] and HTTP responses,
//! implementing Axum's `IntoResponse` trait. Every error body carries a
//! stable machine-readable `code` next to the human-readable `message`, so
//! clients branch on error kinds instead of parsing message strings.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eventsphere_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// Wraps domain errors and provides HTTP-friendly error responses.
///
/// # Examples
///
/// ```ignore
/// async fn handler(state: State<AppState>) -> Result<Json<Event>, AppError> {
///     let event = state.store.get_event(id).await?
///         .ok_or_else(|| AppError::not_found("Event"))?;
///     Ok(Json(event))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// Create a 401 Unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            message.into(),
            "UNAUTHORIZED".to_string(),
        )
    }

    /// Create a 403 Forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            message.into(),
            "FORBIDDEN".to_string(),
        )
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} not found"),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code (for client error handling).
    code: String,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log internal errors
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Map each domain error kind to its HTTP status, carrying over the
/// domain-level error code.
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::Validation(_)
            | DomainError::UsernameTaken
            | DomainError::EmailTaken
            | DomainError::AlreadyRegistered
            | DomainError::CapacityReached
            | DomainError::PaymentRequired => StatusCode::BAD_REQUEST,
            DomainError::InvalidCredentials
            | DomainError::SessionNotFound
            | DomainError::SessionExpired => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let code = err.code().to_string();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            Self::new(status, "An internal error occurred".to_string(), code)
                .with_source(anyhow::Error::new(err))
        } else {
            Self::new(status, err.to_string(), code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AppError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "[BAD_REQUEST] Invalid input");
    }

    #[test]
    fn not_found() {
        let err = AppError::not_found("Event");
        assert_eq!(err.to_string(), "[NOT_FOUND] Event not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn business_rules_map_to_bad_request() {
        for err in [
            DomainError::AlreadyRegistered,
            DomainError::CapacityReached,
            DomainError::PaymentRequired,
        ] {
            let app: AppError = err.into();
            assert_eq!(app.status(), StatusCode::BAD_REQUEST);
        }
        let app: AppError = DomainError::CapacityReached.into();
        assert_eq!(app.code(), "CAPACITY_REACHED");
    }

    #[test]
    fn auth_errors_map_to_unauthorized() {
        let app: AppError = DomainError::InvalidCredentials.into();
        assert_eq!(app.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(app.code(), "INVALID_CREDENTIALS");
    }

    #[test]
    fn internal_errors_hide_details() {
        let app: AppError = DomainError::Internal("mutex poisoned".to_string()).into();
        assert_eq!(app.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.to_string(), "[INTERNAL_SERVER_ERROR] An internal error occurred");
    }
}
