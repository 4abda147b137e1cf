//! Session cookie handling and authentication guard extractors.
//!
//! Provides Axum extractors for:
//! - Session resolution from the session cookie ([`SessionUser`])
//! - Role-based access control ([`RequireEventManager`])
//!
//! # Usage
//!
//! ```rust,ignore
//! use eventsphere_web::extract::{SessionUser, RequireEventManager};
//!
//! // Require authentication
//! async fn my_registrations(session: SessionUser) -> Result<Json<...>, AppError> {
//!     // session.user is guaranteed valid
//! }
//!
//! // Require the event_manager role
//! async fn create_event(manager: RequireEventManager) -> Result<Json<...>, AppError> {
//!     // manager.user.role is guaranteed EventManager
//! }
//! ```

use crate::error::AppError;
use crate::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use cookie::{Cookie, SameSite};
use eventsphere_core::model::{Role, User};
use eventsphere_core::session::{Session, SessionId};
use http::HeaderMap;
use http::header::COOKIE;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "eventsphere_session";

/// Extract the session id from the request's `Cookie` headers, if present.
#[must_use]
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .into_iter()
        .filter_map(|value| value.to_str().ok())
        .map(std::borrow::ToOwned::to_owned)
        .flat_map(Cookie::split_parse)
        .filter_map(std::result::Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()))
}

/// Build the `Set-Cookie` value that establishes a session.
///
/// HttpOnly so scripts cannot read the id; SameSite=Lax for the usual
/// browser navigation flows; Max-Age matches the server-side TTL.
#[must_use]
pub fn session_cookie(session_id: SessionId, max_age_secs: i64) -> String {
    Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_secs))
        .build()
        .to_string()
}

/// Build the `Set-Cookie` value that clears the session cookie.
#[must_use]
pub fn clear_session_cookie() -> String {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .build()
        .to_string()
}

/// Authenticated session user.
///
/// Resolves the session cookie against the session store (expiry enforced)
/// and loads the user record. Use as a handler parameter to require
/// authentication; rejection is 401.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The authenticated user.
    pub user: User,
    /// The live session.
    pub session: Session,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_id = session_id_from_headers(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Not authenticated"))?;

        let session = state
            .sessions
            .get(session_id)
            .await
            .map_err(|_| AppError::unauthorized("Not authenticated"))?;

        let user = state
            .store
            .get_user(session.user_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::unauthorized("Not authenticated"))?;

        Ok(Self { user, session })
    }
}

/// Require the `event_manager` role.
///
/// Any failure — missing or expired session, or a non-manager role — is
/// rejected with 403, so the response does not reveal whether a session
/// existed. (Routes that merely require a session reject with 401 via
/// [`SessionUser`].)
#[derive(Debug, Clone)]
pub struct RequireEventManager {
    /// The authenticated event manager.
    pub user: User,
}

#[async_trait]
impl FromRequestParts<AppState> for RequireEventManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = SessionUser::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::forbidden("Requires event manager role"))?;

        if session.user.role != Role::EventManager {
            return Err(AppError::forbidden("Requires event manager role"));
        }

        Ok(Self { user: session.user })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn session_id_parsed_from_cookie_header() {
        let session_id = SessionId::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!(
                "theme=dark; {SESSION_COOKIE}={session_id}; lang=en"
            ))
            .unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(session_id));
    }

    #[test]
    fn missing_or_malformed_cookie_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}=not-a-uuid")).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn session_cookie_attributes() {
        let value = session_cookie(SessionId::new(), 86_400);
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Max-Age=86400"));
        assert!(value.contains("Path=/"));
    }

    #[test]
    fn clearing_cookie_zeroes_max_age() {
        let value = clear_session_cookie();
        assert!(value.contains("Max-Age=0"));
    }
}
