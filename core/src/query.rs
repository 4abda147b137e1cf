//! Event query filters.
//!
//! Pure, side-effect-free filters over an already-fetched event collection.
//! Filtering is a server concern: the events route applies these from query
//! parameters, and clients display the result as-is.

use crate::model::{Event, EventCategory, EventType};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Temporal window relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// Events scheduled after now.
    Upcoming,
    /// Events scheduled at or before now.
    Past,
}

/// Filter criteria for event listings, deserializable from query parameters
/// (`q`, `category`, `type`, `when`). Empty filter matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    /// Case-insensitive substring matched across title, description and
    /// location.
    pub q: Option<String>,
    /// Restrict to one category.
    pub category: Option<EventCategory>,
    /// Restrict to free or paid events.
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    /// Restrict to a temporal window.
    pub when: Option<TimeWindow>,
}

/// Case-insensitive substring match across title, description and location.
#[must_use]
pub fn matches_text(event: &Event, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    event.title.to_lowercase().contains(&needle)
        || event.description.to_lowercase().contains(&needle)
        || event.location.to_lowercase().contains(&needle)
}

/// Apply a filter to an event collection, preserving order.
#[must_use]
pub fn filter_events(events: &[Event], filter: &EventFilter, now: DateTime<Utc>) -> Vec<Event> {
    events
        .iter()
        .filter(|event| {
            filter
                .q
                .as_deref()
                .is_none_or(|needle| matches_text(event, needle))
        })
        .filter(|event| filter.category.is_none_or(|category| event.category == category))
        .filter(|event| {
            filter
                .event_type
                .is_none_or(|event_type| event.event_type == event_type)
        })
        .filter(|event| {
            filter.when.is_none_or(|when| match when {
                TimeWindow::Upcoming => event.event_date > now,
                TimeWindow::Past => event.event_date <= now,
            })
        })
        .cloned()
        .collect()
}
