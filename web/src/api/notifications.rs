//! Notification endpoints.
//!
//! - GET /api/notifications - The authenticated user's notifications
//! - PUT /api/notifications/:id/read - Mark one as read (owner only)
//!
//! Notifications cannot be deleted; the read flag only transitions
//! false → true.

use crate::error::AppError;
use crate::extract::SessionUser;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use eventsphere_core::model::{Notification, NotificationId};

/// List the authenticated user's notifications.
///
/// # Errors
///
/// Returns 500 only on internal store failures.
pub async fn list_notifications(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = state
        .store
        .notifications_by_user(session.user.id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(notifications))
}

/// Mark a notification as read.
///
/// # Errors
///
/// Returns 404 if the notification does not exist or belongs to another
/// user — the same response in both cases, so the endpoint is not an
/// existence oracle.
pub async fn mark_read(
    session: SessionUser,
    State(state): State<AppState>,
    Path(notification_id): Path<i64>,
) -> Result<Json<Notification>, AppError> {
    let notification_id = NotificationId(notification_id);
    let owned = state
        .store
        .get_notification(notification_id)
        .await
        .map_err(AppError::from)?
        .is_some_and(|notification| notification.user_id == session.user.id);
    if !owned {
        return Err(AppError::not_found("Notification"));
    }

    let updated = state
        .store
        .mark_notification_read(notification_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Notification"))?;

    Ok(Json(updated))
}
