//! Registration endpoints.
//!
//! - POST /api/registrations - Register the authenticated user for an event
//! - DELETE /api/registrations/:id - Cancel one of the user's registrations
//! - PUT /api/registrations/:id/attended - Mark attendance (organizer)
//! - GET /api/registrations/user - The user's registrations
//! - GET /api/registrations/event/:id - An event's registrations (organizer
//!   or any event manager)
//!
//! The invariant checks (duplicates, capacity, payment) live in
//! [`eventsphere_core::registration`], not here.

use super::MessageResponse;
use crate::error::AppError;
use crate::extract::{RequireEventManager, SessionUser};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use eventsphere_core::model::{
    EventId, Registration, RegistrationId, RegistrationPatch, Role,
};
use serde::Deserialize;

/// Request to register for an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    /// The event to register for.
    pub event_id: EventId,
    /// Whether payment has been made (paid events only).
    #[serde(default)]
    pub has_paid: bool,
}

/// Register the authenticated user for an event.
///
/// # Errors
///
/// - 404 if the event does not exist
/// - 400 for duplicate registration, reached capacity, or missing payment
pub async fn create_registration(
    session: SessionUser,
    State(state): State<AppState>,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<Registration>), AppError> {
    let registration = state
        .registration
        .register(session.user.id, request.event_id, request.has_paid)
        .await
        .map_err(AppError::from)?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// Cancel one of the authenticated user's registrations, freeing a
/// capacity slot.
///
/// # Errors
///
/// Returns 404 if the registration does not exist or belongs to another
/// user.
pub async fn delete_registration(
    session: SessionUser,
    State(state): State<AppState>,
    Path(registration_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .registration
        .unregister(session.user.id, RegistrationId(registration_id))
        .await
        .map_err(AppError::from)?;

    Ok(Json(MessageResponse::new(
        "Registration cancelled successfully",
    )))
}

/// Mark a registration as attended. Only the organizer of the registered
/// event may do so.
///
/// # Errors
///
/// Returns 404 for unknown registrations or events, 403 for
/// non-organizers.
pub async fn mark_attended(
    manager: RequireEventManager,
    State(state): State<AppState>,
    Path(registration_id): Path<i64>,
) -> Result<Json<Registration>, AppError> {
    let registration = state
        .store
        .get_registration(RegistrationId(registration_id))
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Registration"))?;

    let event = state
        .store
        .get_event(registration.event_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Event"))?;

    if event.organizer_id != manager.user.id {
        return Err(AppError::forbidden(
            "You don't have permission to update this registration",
        ));
    }

    let updated = state
        .store
        .update_registration(
            registration.id,
            RegistrationPatch {
                has_paid: None,
                has_attended: Some(true),
            },
        )
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Registration"))?;

    Ok(Json(updated))
}

/// List the authenticated user's registrations.
///
/// # Errors
///
/// Returns 500 only on internal store failures.
pub async fn list_user_registrations(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Registration>>, AppError> {
    let registrations = state
        .store
        .registrations_by_user(session.user.id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(registrations))
}

/// List an event's registrations.
///
/// Visible to the event's organizer and to any event manager.
///
/// # Errors
///
/// Returns 403 for everyone else.
pub async fn list_event_registrations(
    session: SessionUser,
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<Registration>>, AppError> {
    let event_id = EventId(event_id);
    let event = state
        .store
        .get_event(event_id)
        .await
        .map_err(AppError::from)?;

    let is_organizer = event
        .as_ref()
        .is_some_and(|event| event.organizer_id == session.user.id);
    if !is_organizer && session.user.role != Role::EventManager {
        return Err(AppError::forbidden(
            "You don't have permission to view these registrations",
        ));
    }

    let registrations = state
        .store
        .registrations_by_event(event_id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(registrations))
}
