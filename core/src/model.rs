//! Domain model types.
//!
//! Entity identifiers are monotonically increasing integers assigned by the
//! store at creation time and never reused. JSON field names follow the
//! camelCase wire contract of the web client (`eventDate`, `hasPaid`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(pub i64);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub i64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Enums
// ═══════════════════════════════════════════════════════════════════════

/// User role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular student account (default for new users).
    #[default]
    Student,
    /// Account permitted to create and manage the events it organizes.
    EventManager,
}

impl Role {
    /// Get the role name as its wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::EventManager => "event_manager",
        }
    }
}

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Technical events (workshops, hackathons, talks).
    Technical,
    /// Non-technical events (cultural, sports, social).
    NonTechnical,
}

impl EventCategory {
    /// Get the category as its wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::NonTechnical => "non_technical",
        }
    }

    /// Parse a category from its wire string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known category.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "technical" => Ok(Self::Technical),
            "non_technical" => Ok(Self::NonTechnical),
            _ => Err(format!("Unknown event category: {s}")),
        }
    }
}

/// Whether an event is free to attend or requires payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Free event; registrations are always marked paid.
    #[default]
    Free,
    /// Paid event; registration requires payment confirmation.
    Paid,
}

// ═══════════════════════════════════════════════════════════════════════
// Entities
// ═══════════════════════════════════════════════════════════════════════

/// A registered account.
///
/// `password_hash` holds the salted hash produced by [`crate::password::hash`];
/// it must never be serialized to clients (the web layer exposes a response
/// type without it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Login name, unique across all users.
    pub username: String,
    /// Salted password hash (never the plaintext password).
    pub password_hash: String,
    /// Contact email, unique across all users.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role controlling event-management permissions.
    pub role: Role,
    /// Department or faculty.
    pub department: Option<String>,
    /// Free-form profile text.
    pub bio: Option<String>,
    /// Profile image URL.
    pub profile_image: Option<String>,
    /// Employer (event managers).
    pub company: Option<String>,
    /// Years of professional experience (event managers).
    pub years_of_experience: Option<u32>,
}

/// A listed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Venue or location text.
    pub location: String,
    /// Scheduled date and time.
    pub event_date: DateTime<Utc>,
    /// Category for browsing.
    pub category: EventCategory,
    /// Free or paid.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Ticket price; always 0 for free events.
    pub price: i64,
    /// Maximum number of registrations accepted; at least 1.
    pub capacity: u32,
    /// Banner image URL.
    pub banner_image: Option<String>,
    /// The user who organizes this event.
    pub organizer_id: UserId,
}

/// A user's registration for an event.
///
/// At most one registration exists per (user, event) pair, and the number of
/// registrations for an event never exceeds its capacity; both invariants are
/// enforced by [`crate::registration::RegistrationService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Store-assigned identifier.
    pub id: RegistrationId,
    /// The registered user.
    pub user_id: UserId,
    /// The event registered for.
    pub event_id: EventId,
    /// When the registration was created.
    pub registration_date: DateTime<Utc>,
    /// Whether payment has been confirmed (always `true` for free events).
    pub has_paid: bool,
    /// Whether the user attended the event.
    pub has_attended: bool,
}

/// A message delivered to a user, created as a side effect of registration.
///
/// Notifications are never deleted; `is_read` only transitions false → true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Store-assigned identifier.
    pub id: NotificationId,
    /// The user this notification belongs to.
    pub user_id: UserId,
    /// Human-readable message.
    pub message: String,
    /// Whether the user has read the notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// The event this notification refers to, if any.
    pub event_id: Option<EventId>,
}

// ═══════════════════════════════════════════════════════════════════════
// Insert inputs & partial updates
// ═══════════════════════════════════════════════════════════════════════

/// Input for creating a user. The caller is responsible for uniqueness checks
/// and for hashing the password before constructing this.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Salted password hash.
    pub password_hash: String,
    /// Contact email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role for the new account.
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

/// Input for creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Venue or location text.
    pub location: String,
    /// Scheduled date and time.
    pub event_date: DateTime<Utc>,
    /// Category for browsing.
    pub category: EventCategory,
    /// Free or paid.
    pub event_type: EventType,
    /// Ticket price; ignored (coerced to 0) for free events.
    pub price: Option<i64>,
    /// Maximum number of registrations.
    pub capacity: u32,
    /// Banner image URL.
    pub banner_image: Option<String>,
    /// The organizing user.
    pub organizer_id: UserId,
}

/// Partial update for a user's profile. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New contact email (uniqueness re-checked by the caller).
    pub email: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New profile text.
    pub bio: Option<String>,
    /// New profile image URL.
    pub profile_image: Option<String>,
    /// New employer.
    pub company: Option<String>,
    /// New years of experience.
    pub years_of_experience: Option<u32>,
}

/// Partial update for an event. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New date and time.
    pub event_date: Option<DateTime<Utc>>,
    /// New category.
    pub category: Option<EventCategory>,
    /// New event type.
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    /// New price (coerced back to 0 if the merged event is free).
    pub price: Option<i64>,
    /// New capacity.
    pub capacity: Option<u32>,
    /// New banner image URL.
    pub banner_image: Option<String>,
}

/// Partial update for a registration. `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationPatch {
    /// New payment status.
    pub has_paid: Option<bool>,
    /// New attendance status.
    pub has_attended: Option<bool>,
}
