//! Analytics endpoints backing the dashboard.
//!
//! - GET /api/analytics/user - Counts for the authenticated user
//! - GET /api/analytics/event/:id - Stats for one event (organizer only)

use crate::error::AppError;
use crate::extract::{RequireEventManager, SessionUser};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use eventsphere_core::model::EventId;
use serde::Serialize;

/// Dashboard counts for one user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalyticsResponse {
    /// Events the user is registered for.
    pub registered_events: usize,
    /// Events the user has attended.
    pub attended_events: usize,
    /// Registered events that are still in the future.
    pub upcoming_events: usize,
}

/// Stats for one event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAnalyticsResponse {
    /// Total registrations.
    pub total_registrations: usize,
    /// Registrations marked attended.
    pub attendees: usize,
    /// Event capacity.
    pub capacity: u32,
    /// Registrations as a percentage of capacity.
    pub fill_rate: f64,
}

/// Counts for the authenticated user's dashboard.
///
/// # Errors
///
/// Returns 500 only on internal store failures.
pub async fn user_analytics(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<UserAnalyticsResponse>, AppError> {
    let user_id = session.user.id;
    let registered = state
        .store
        .registered_events_count(user_id)
        .await
        .map_err(AppError::from)?;
    let attended = state
        .store
        .user_attendance_count(user_id)
        .await
        .map_err(AppError::from)?;

    // Of the user's registrations, how many point at events still ahead.
    let now = Utc::now();
    let mut upcoming = 0;
    for registration in state
        .store
        .registrations_by_user(user_id)
        .await
        .map_err(AppError::from)?
    {
        let event = state
            .store
            .get_event(registration.event_id)
            .await
            .map_err(AppError::from)?;
        if event.is_some_and(|event| event.event_date > now) {
            upcoming += 1;
        }
    }

    Ok(Json(UserAnalyticsResponse {
        registered_events: registered,
        attended_events: attended,
        upcoming_events: upcoming,
    }))
}

/// Stats for one event. Only its organizer may view them.
///
/// # Errors
///
/// Returns 404 for unknown events, 403 for non-organizers.
pub async fn event_analytics(
    manager: RequireEventManager,
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventAnalyticsResponse>, AppError> {
    let event_id = EventId(event_id);
    let event = state
        .store
        .get_event(event_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Event"))?;

    if event.organizer_id != manager.user.id {
        return Err(AppError::forbidden(
            "You don't have permission to view these analytics",
        ));
    }

    let total = state
        .store
        .registrations_by_event(event_id)
        .await
        .map_err(AppError::from)?
        .len();
    let attendees = state
        .store
        .event_attendance_count(event_id)
        .await
        .map_err(AppError::from)?;

    #[allow(clippy::cast_precision_loss)] // Counts are far below 2^52
    let fill_rate = if event.capacity > 0 {
        (total as f64 / f64::from(event.capacity)) * 100.0
    } else {
        0.0
    };

    Ok(Json(EventAnalyticsResponse {
        total_registrations: total,
        attendees,
        capacity: event.capacity,
        fill_rate,
    }))
}
