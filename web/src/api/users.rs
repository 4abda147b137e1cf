//! User account endpoints.
//!
//! - POST /api/users - Register a new account (public)
//! - GET /api/users/:id - Get a user's public profile (requires auth)
//! - PUT /api/users/me - Update the authenticated user's profile

use crate::error::AppError;
use crate::extract::SessionUser;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use eventsphere_core::model::{NewUser, Role, User, UserId, UserPatch};
use eventsphere_core::{DomainError, password};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to register a new account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Login name; unique across all users.
    pub username: String,
    /// Plaintext password; hashed before storage, never stored as-is.
    pub password: String,
    /// Contact email; unique across all users.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account role (defaults to student).
    #[serde(default)]
    pub role: Role,
    /// Department or faculty.
    pub department: Option<String>,
    /// Free-form profile text.
    pub bio: Option<String>,
    /// Profile image URL.
    pub profile_image: Option<String>,
    /// Employer.
    pub company: Option<String>,
    /// Years of professional experience.
    pub years_of_experience: Option<u32>,
}

/// A user as exposed to clients. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account role.
    pub role: Role,
    /// Department or faculty.
    pub department: Option<String>,
    /// Free-form profile text.
    pub bio: Option<String>,
    /// Profile image URL.
    pub profile_image: Option<String>,
    /// Employer.
    pub company: Option<String>,
    /// Years of professional experience.
    pub years_of_experience: Option<u32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            department: user.department,
            bio: user.bio,
            profile_image: user.profile_image,
            company: user.company,
            years_of_experience: user.years_of_experience,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Register a new account.
///
/// Public endpoint. Enforces username and email uniqueness (the store itself
/// does not) and hashes the password before storage.
///
/// # Errors
///
/// Returns 400 on validation failures or taken username/email.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    validate_new_user(&request)?;

    if state
        .store
        .get_user_by_username(&request.username)
        .await
        .map_err(AppError::from)?
        .is_some()
    {
        return Err(DomainError::UsernameTaken.into());
    }

    if state
        .store
        .get_user_by_email(&request.email)
        .await
        .map_err(AppError::from)?
        .is_some()
    {
        return Err(DomainError::EmailTaken.into());
    }

    let user = state
        .store
        .create_user(NewUser {
            username: request.username,
            password_hash: password::hash(&request.password),
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            role: request.role,
            department: request.department,
            bio: request.bio,
            profile_image: request.profile_image,
            company: request.company,
            years_of_experience: request.years_of_experience,
        })
        .await
        .map_err(AppError::from)?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "user registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Get a user's public profile by id.
///
/// Requires authentication.
///
/// # Errors
///
/// Returns 404 if the user does not exist.
pub async fn get_user(
    _session: SessionUser,
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .store
        .get_user(UserId(user_id))
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(Json(user.into()))
}

/// Update the authenticated user's profile.
///
/// Partial merge: absent fields are left unchanged. Email uniqueness is
/// re-checked when the email changes.
///
/// # Errors
///
/// Returns 400 if the new email is taken or invalid.
pub async fn update_profile(
    session: SessionUser,
    State(state): State<AppState>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<UserResponse>, AppError> {
    if let Some(email) = &patch.email {
        if !is_valid_email(email) {
            return Err(AppError::bad_request("Invalid email address"));
        }
        let taken = state
            .store
            .get_user_by_email(email)
            .await
            .map_err(AppError::from)?
            .is_some_and(|other| other.id != session.user.id);
        if taken {
            return Err(DomainError::EmailTaken.into());
        }
    }

    let user = state
        .store
        .update_user(session.user.id, patch)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(Json(user.into()))
}

fn validate_new_user(request: &CreateUserRequest) -> Result<(), AppError> {
    if request.username.trim().is_empty() {
        return Err(AppError::bad_request("Username is required"));
    }
    if request.password.is_empty() {
        return Err(AppError::bad_request("Password is required"));
    }
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(AppError::bad_request("First and last name are required"));
    }
    if !is_valid_email(&request.email) {
        return Err(AppError::bad_request("Invalid email address"));
    }
    Ok(())
}

/// Basic email shape check: one `@`, non-empty local and domain parts, a
/// dotted domain with no empty labels.
fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 || email.len() > 255 {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user+tag@subdomain.example.com"));
    }

    #[test]
    fn invalid_emails() {
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("user@@example.com"));
    }
}
