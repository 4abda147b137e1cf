//! Event management endpoints.
//!
//! - GET /api/events - List events with server-side filters
//! - GET /api/events/:id - Get event details
//! - POST /api/events - Create an event (event managers)
//! - PUT /api/events/:id - Update an event (organizer only)
//! - DELETE /api/events/:id - Delete an event (organizer only)
//! - GET /api/events/category/:category - List events in a category
//! - GET /api/events/organizer/:id - List events by organizer

use super::MessageResponse;
use crate::error::AppError;
use crate::extract::RequireEventManager;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use eventsphere_core::model::{Event, EventCategory, EventId, EventPatch, EventType, NewEvent, UserId};
use eventsphere_core::query::{EventFilter, filter_events};
use serde::Deserialize;

// ============================================================================
// Request Types
// ============================================================================

/// Request to create a new event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Venue or location text.
    pub location: String,
    /// Scheduled date and time (RFC 3339).
    pub event_date: DateTime<Utc>,
    /// Category for browsing.
    pub category: EventCategory,
    /// Free or paid (defaults to free).
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    /// Ticket price; ignored for free events.
    pub price: Option<i64>,
    /// Maximum number of registrations; at least 1.
    pub capacity: u32,
    /// Banner image URL.
    pub banner_image: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// List events, applying any server-side filters from the query string
/// (`q`, `category`, `type`, `when=upcoming|past`).
///
/// Public endpoint.
///
/// # Errors
///
/// Returns 500 only on internal store failures.
pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = state.store.all_events().await.map_err(AppError::from)?;
    Ok(Json(filter_events(&events, &filter, Utc::now())))
}

/// Get event details by id.
///
/// Public endpoint.
///
/// # Errors
///
/// Returns 404 if the event does not exist.
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Event>, AppError> {
    let event = state
        .store
        .get_event(EventId(event_id))
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Event"))?;
    Ok(Json(event))
}

/// Create a new event. The authenticated manager becomes the organizer.
///
/// # Errors
///
/// Returns 400 on validation failures, 403 without the event manager role.
pub async fn create_event(
    manager: RequireEventManager,
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    validate_event_fields(&request.title, &request.description, &request.location)?;
    if request.capacity == 0 {
        return Err(AppError::bad_request("Capacity must be at least 1"));
    }
    if request.price.is_some_and(|price| price < 0) {
        return Err(AppError::bad_request("Price must not be negative"));
    }

    let event = state
        .store
        .create_event(NewEvent {
            title: request.title,
            description: request.description,
            location: request.location,
            event_date: request.event_date,
            category: request.category,
            event_type: request.event_type,
            price: request.price,
            capacity: request.capacity,
            banner_image: request.banner_image,
            organizer_id: manager.user.id,
        })
        .await
        .map_err(AppError::from)?;

    tracing::info!(event_id = %event.id, organizer_id = %manager.user.id, "event created");

    Ok((StatusCode::CREATED, Json(event)))
}

/// Update an event. Only its organizer may do so.
///
/// # Errors
///
/// Returns 404 if the event does not exist, 403 for non-organizers.
pub async fn update_event(
    manager: RequireEventManager,
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<Event>, AppError> {
    let event_id = EventId(event_id);
    let existing = state
        .store
        .get_event(event_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Event"))?;

    if existing.organizer_id != manager.user.id {
        return Err(AppError::forbidden(
            "You don't have permission to update this event",
        ));
    }

    if patch.capacity == Some(0) {
        return Err(AppError::bad_request("Capacity must be at least 1"));
    }
    if patch.price.is_some_and(|price| price < 0) {
        return Err(AppError::bad_request("Price must not be negative"));
    }

    let updated = state
        .store
        .update_event(event_id, patch)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Event"))?;

    Ok(Json(updated))
}

/// Delete an event. Only its organizer may do so.
///
/// # Errors
///
/// Returns 404 if the event does not exist, 403 for non-organizers.
pub async fn delete_event(
    manager: RequireEventManager,
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let event_id = EventId(event_id);
    let existing = state
        .store
        .get_event(event_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Event"))?;

    if existing.organizer_id != manager.user.id {
        return Err(AppError::forbidden(
            "You don't have permission to delete this event",
        ));
    }

    state
        .store
        .delete_event(event_id)
        .await
        .map_err(AppError::from)?;

    tracing::info!(event_id = %event_id, "event deleted");

    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

/// List events in a category.
///
/// Public endpoint.
///
/// # Errors
///
/// Returns 400 for an unknown category string.
pub async fn events_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Event>>, AppError> {
    let category = EventCategory::from_str(&category).map_err(AppError::bad_request)?;
    let events = state
        .store
        .events_by_category(category)
        .await
        .map_err(AppError::from)?;
    Ok(Json(events))
}

/// List events organized by a user.
///
/// Public endpoint.
///
/// # Errors
///
/// Returns 500 only on internal store failures.
pub async fn events_by_organizer(
    State(state): State<AppState>,
    Path(organizer_id): Path<i64>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = state
        .store
        .events_by_organizer(UserId(organizer_id))
        .await
        .map_err(AppError::from)?;
    Ok(Json(events))
}

fn validate_event_fields(title: &str, description: &str, location: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::bad_request("Title is required"));
    }
    if description.trim().is_empty() {
        return Err(AppError::bad_request("Description is required"));
    }
    if location.trim().is_empty() {
        return Err(AppError::bad_request("Location is required"));
    }
    Ok(())
}
