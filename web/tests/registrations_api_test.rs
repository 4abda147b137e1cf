//! Registration workflow, notifications and analytics over the HTTP
//! surface, including the end-to-end capacity scenario.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

mod common;

use common::{create_event, event_payload, login, register_user, send, test_app};
use http::StatusCode;
use serde_json::{Value, json};

async fn register_for_event(
    app: &axum::Router,
    cookie: &str,
    event_id: i64,
    has_paid: bool,
) -> (StatusCode, Value) {
    let (status, _, body) = send(
        app,
        "POST",
        "/api/registrations",
        Some(json!({ "eventId": event_id, "hasPaid": has_paid })),
        Some(cookie),
    )
    .await;
    (status, body)
}

#[tokio::test]
async fn capacity_one_scenario_with_alice_bob_and_carol() {
    let app = test_app().await;

    // Event manager alice creates a free capacity-1 event.
    register_user(&app, "alice", "event_manager").await;
    let alice = login(&app, "alice", "secret123").await;
    let mut payload = event_payload("Intro to Rust");
    payload["capacity"] = json!(1);
    let event = create_event(&app, &alice, payload).await;
    let event_id = event["id"].as_i64().unwrap();

    // Student bob takes the only slot.
    register_user(&app, "bob", "student").await;
    let bob = login(&app, "bob", "secret123").await;
    let (status, registration) = register_for_event(&app, &bob, event_id, false).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registration["hasPaid"], true);
    assert_eq!(registration["hasAttended"], false);
    assert_eq!(registration["eventId"], event_id);

    // Exactly one notification for bob, referencing the event.
    let (status, _, notifications) =
        send(&app, "GET", "/api/notifications", None, Some(&bob)).await;
    assert_eq!(status, StatusCode::OK);
    let notifications = notifications.as_array().unwrap().clone();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["eventId"], event_id);
    assert_eq!(notifications[0]["isRead"], false);
    assert!(
        notifications[0]["message"]
            .as_str()
            .unwrap()
            .contains("Intro to Rust")
    );

    // Carol is turned away at the door.
    register_user(&app, "carol", "student").await;
    let carol = login(&app, "carol", "secret123").await;
    let (status, body) = register_for_event(&app, &carol, event_id, false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CAPACITY_REACHED");
    assert_eq!(body["message"], "Event capacity reached");
}

#[tokio::test]
async fn duplicate_registration_is_rejected_with_one_stored_record() {
    let app = test_app().await;
    let manager = login(&app, "manager", "password").await;
    let event = create_event(&app, &manager, event_payload("Tech Talk")).await;
    let event_id = event["id"].as_i64().unwrap();

    let student = login(&app, "student", "password").await;
    let (status, _) = register_for_event(&app, &student, event_id, false).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register_for_event(&app, &student, event_id, false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ALREADY_REGISTERED");

    let (_, _, mine) = send(&app, "GET", "/api/registrations/user", None, Some(&student)).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn paid_events_gate_on_payment() {
    let app = test_app().await;
    let manager = login(&app, "manager", "password").await;
    let mut payload = event_payload("Gala Dinner");
    payload["type"] = json!("paid");
    payload["price"] = json!(150);
    let event = create_event(&app, &manager, payload).await;
    let event_id = event["id"].as_i64().unwrap();

    let student = login(&app, "student", "password").await;
    let (status, body) = register_for_event(&app, &student, event_id, false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PAYMENT_REQUIRED");

    let (status, registration) = register_for_event(&app, &student, event_id, true).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registration["hasPaid"], true);
}

#[tokio::test]
async fn registering_for_a_missing_event_is_not_found() {
    let app = test_app().await;
    let student = login(&app, "student", "password").await;
    let (status, body) = register_for_event(&app, &student, 999, false).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Event not found");
}

#[tokio::test]
async fn registration_requires_a_session() {
    let app = test_app().await;
    let (status, _, _) = send(
        &app,
        "POST",
        "/api/registrations",
        Some(json!({ "eventId": 1 })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn event_registration_listing_is_guarded() {
    let app = test_app().await;
    let manager = login(&app, "manager", "password").await;
    let event = create_event(&app, &manager, event_payload("Guarded Event")).await;
    let event_id = event["id"].as_i64().unwrap();

    let student = login(&app, "student", "password").await;
    let (status, _) = register_for_event(&app, &student, event_id, false).await;
    assert_eq!(status, StatusCode::CREATED);

    // A plain student may not inspect the attendee list.
    let (status, _, _) = send(
        &app,
        "GET",
        &format!("/api/registrations/event/{event_id}"),
        None,
        Some(&student),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The organizer may.
    let (status, _, listed) = send(
        &app,
        "GET",
        &format!("/api/registrations/event/{event_id}"),
        None,
        Some(&manager),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn foreign_notifications_cannot_be_marked_read() {
    let app = test_app().await;
    let manager = login(&app, "manager", "password").await;
    let event = create_event(&app, &manager, event_payload("Notify Event")).await;
    let event_id = event["id"].as_i64().unwrap();

    let student = login(&app, "student", "password").await;
    let (status, _) = register_for_event(&app, &student, event_id, false).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, _, notifications) =
        send(&app, "GET", "/api/notifications", None, Some(&student)).await;
    let notification_id = notifications[0]["id"].as_i64().unwrap();

    // Another user gets 404, not 403: the endpoint does not reveal that the
    // notification exists.
    register_user(&app, "mallory", "student").await;
    let mallory = login(&app, "mallory", "secret123").await;
    let (status, _, body) = send(
        &app,
        "PUT",
        &format!("/api/notifications/{notification_id}/read"),
        None,
        Some(&mallory),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    // The target notification is untouched.
    let (_, _, notifications) =
        send(&app, "GET", "/api/notifications", None, Some(&student)).await;
    assert_eq!(notifications[0]["isRead"], false);

    // The owner can mark it read.
    let (status, _, updated) = send(
        &app,
        "PUT",
        &format!("/api/notifications/{notification_id}/read"),
        None,
        Some(&student),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isRead"], true);
}

#[tokio::test]
async fn cancelling_a_registration_frees_the_slot() {
    let app = test_app().await;
    let manager = login(&app, "manager", "password").await;
    let mut payload = event_payload("Tiny Venue");
    payload["capacity"] = json!(1);
    let event = create_event(&app, &manager, payload).await;
    let event_id = event["id"].as_i64().unwrap();

    let student = login(&app, "student", "password").await;
    let (status, registration) = register_for_event(&app, &student, event_id, false).await;
    assert_eq!(status, StatusCode::CREATED);
    let registration_id = registration["id"].as_i64().unwrap();

    register_user(&app, "walt", "student").await;
    let walt = login(&app, "walt", "secret123").await;
    let (status, _) = register_for_event(&app, &walt, event_id, false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Walt cannot cancel someone else's registration.
    let (status, _, _) = send(
        &app,
        "DELETE",
        &format!("/api/registrations/{registration_id}"),
        None,
        Some(&walt),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owner can, after which the slot is free again.
    let (status, _, _) = send(
        &app,
        "DELETE",
        &format!("/api/registrations/{registration_id}"),
        None,
        Some(&student),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = register_for_event(&app, &walt, event_id, false).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn attendance_marking_and_analytics() {
    let app = test_app().await;
    let manager = login(&app, "manager", "password").await;
    let mut payload = event_payload("Analytics Event");
    payload["capacity"] = json!(2);
    let event = create_event(&app, &manager, payload).await;
    let event_id = event["id"].as_i64().unwrap();

    let student = login(&app, "student", "password").await;
    let (status, registration) = register_for_event(&app, &student, event_id, false).await;
    assert_eq!(status, StatusCode::CREATED);
    let registration_id = registration["id"].as_i64().unwrap();

    // A rival manager is not the organizer.
    register_user(&app, "rival", "event_manager").await;
    let rival = login(&app, "rival", "secret123").await;
    let (status, _, _) = send(
        &app,
        "PUT",
        &format!("/api/registrations/{registration_id}/attended"),
        None,
        Some(&rival),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The organizer marks attendance.
    let (status, _, updated) = send(
        &app,
        "PUT",
        &format!("/api/registrations/{registration_id}/attended"),
        None,
        Some(&manager),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["hasAttended"], true);

    // Event analytics: organizer only.
    let (status, _, _) = send(
        &app,
        "GET",
        &format!("/api/analytics/event/{event_id}"),
        None,
        Some(&rival),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, stats) = send(
        &app,
        "GET",
        &format!("/api/analytics/event/{event_id}"),
        None,
        Some(&manager),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalRegistrations"], 1);
    assert_eq!(stats["attendees"], 1);
    assert_eq!(stats["capacity"], 2);
    assert_eq!(stats["fillRate"], 50.0);

    // User analytics for the student: one registration, attended, upcoming.
    let (status, _, counts) =
        send(&app, "GET", "/api/analytics/user", None, Some(&student)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(counts["registeredEvents"], 1);
    assert_eq!(counts["attendedEvents"], 1);
    assert_eq!(counts["upcomingEvents"], 1);
}
