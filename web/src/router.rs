//! Router configuration.
//!
//! Builds the complete Axum router with all endpoints.

use crate::api::{analytics, auth, events, notifications, registrations, users};
use crate::state::AppState;
use axum::{
    Router,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Simple liveness check.
#[allow(clippy::unused_async)]
async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Build the complete Axum router.
///
/// Configures all routes:
/// - Health check
/// - Authentication endpoints
/// - User, event, registration and notification endpoints
/// - Analytics endpoints
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::current_session))
        // Users
        .route("/users", post(users::create_user))
        .route("/users/me", put(users::update_profile))
        .route("/users/:id", get(users::get_user))
        // Events
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/category/:category", get(events::events_by_category))
        .route("/events/organizer/:id", get(events::events_by_organizer))
        // Registrations
        .route("/registrations", post(registrations::create_registration))
        .route("/registrations/user", get(registrations::list_user_registrations))
        .route(
            "/registrations/event/:id",
            get(registrations::list_event_registrations),
        )
        .route("/registrations/:id", delete(registrations::delete_registration))
        .route("/registrations/:id/attended", put(registrations::mark_attended))
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/:id/read", put(notifications::mark_read))
        // Analytics
        .route("/analytics/user", get(analytics::user_analytics))
        .route("/analytics/event/:id", get(analytics::event_analytics));

    Router::new()
        // Health check (no authentication)
        .route("/health", get(health_check))
        // API routes under /api prefix
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        // Browser clients send the session cookie cross-origin in development
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
