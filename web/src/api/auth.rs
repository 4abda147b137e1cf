//! Authentication endpoints.
//!
//! - POST /api/auth/login - Establish a session from credentials
//! - POST /api/auth/logout - Destroy the current session
//! - GET /api/auth/session - Return the authenticated user
//!
//! The session id travels in an HttpOnly cookie; see [`crate::extract`].

use super::MessageResponse;
use super::users::UserResponse;
use crate::error::AppError;
use crate::extract::{SessionUser, clear_session_cookie, session_cookie};
use crate::state::AppState;
use axum::{Json, extract::State};
use eventsphere_core::{DomainError, password};
use http::header::SET_COOKIE;
use serde::Deserialize;

/// Login credentials.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password (verified against the stored hash).
    pub password: String,
}

/// Authenticate and establish a session.
///
/// On success, responds with the user object and a `Set-Cookie` header
/// carrying the new session id.
///
/// # Errors
///
/// Returns 401 with the same body whether the username is unknown or the
/// password wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<([(http::HeaderName, String); 1], Json<UserResponse>), AppError> {
    let user = state
        .store
        .get_user_by_username(&request.username)
        .await
        .map_err(AppError::from)?
        .ok_or(DomainError::InvalidCredentials)?;

    if !password::verify(&request.password, &user.password_hash) {
        return Err(DomainError::InvalidCredentials.into());
    }

    let session = state
        .sessions
        .create(user.id, state.session_ttl)
        .await
        .map_err(AppError::from)?;

    tracing::info!(user_id = %user.id, "login");

    let cookie = session_cookie(session.session_id, state.session_ttl.num_seconds());
    Ok(([(SET_COOKIE, cookie)], Json(user.into())))
}

/// Destroy the current session and clear the cookie.
///
/// # Errors
///
/// Returns 401 when no valid session is presented.
pub async fn logout(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<([(http::HeaderName, String); 1], Json<MessageResponse>), AppError> {
    state
        .sessions
        .delete(session.session.session_id)
        .await
        .map_err(AppError::from)?;

    tracing::info!(user_id = %session.user.id, "logout");

    Ok((
        [(SET_COOKIE, clear_session_cookie())],
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

/// Return the currently authenticated user.
///
/// The [`SessionUser`] extractor rejects with 401 when no valid session is
/// presented.
pub async fn current_session(session: SessionUser) -> Json<UserResponse> {
    Json(session.user.into())
}
