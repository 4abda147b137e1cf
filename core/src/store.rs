//! In-memory data store.
//!
//! Four keyed collections (users, events, registrations, notifications),
//! each with a monotonically increasing identifier counter starting at 1.
//! Ids are never reused, including after deletion.
//!
//! The store lives for the process lifetime only; losing all data on restart
//! is a documented limitation, not a bug. By-key lookups are linear scans and
//! the store enforces no uniqueness constraints — duplicate prevention is the
//! caller's responsibility (user creation routes, registration workflow).
//!
//! Construct one [`MemoryStore`] at startup and share it as
//! `Arc<MemoryStore>`; there is no global instance.

use crate::error::{DomainError, Result};
use crate::model::{
    Event, EventCategory, EventId, EventPatch, EventType, NewEvent, NewUser, Notification,
    NotificationId, Registration, RegistrationId, RegistrationPatch, Role, User, UserId, UserPatch,
};
use crate::password;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// One keyed collection plus its id counter.
#[derive(Debug)]
struct Table<K, V> {
    rows: HashMap<K, V>,
    next_id: i64,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<K, V> Table<K, V> {
    /// Hand out the next identifier. Monotonic, never reused.
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| DomainError::Internal("store mutex poisoned".to_string()))
}

/// In-memory storage for all four entity kinds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<Table<UserId, User>>,
    events: Mutex<Table<EventId, Event>>,
    registrations: Mutex<Table<RegistrationId, Registration>>,
    notifications: Mutex<Table<NotificationId, Notification>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the sample "manager" and "student" accounts (password
    /// "password" for both, stored hashed). Intended for development and
    /// demos; gated behind configuration in the server binary.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn seed_sample_data(&self) -> Result<()> {
        self.create_user(NewUser {
            username: "manager".to_string(),
            password_hash: password::hash("password"),
            email: "manager@example.com".to_string(),
            first_name: "Event".to_string(),
            last_name: "Manager".to_string(),
            role: Role::EventManager,
            department: Some("Computer Science".to_string()),
            bio: Some("I organize tech events".to_string()),
            profile_image: None,
            company: Some("TechEvents Inc.".to_string()),
            years_of_experience: Some(5),
        })
        .await?;

        self.create_user(NewUser {
            username: "student".to_string(),
            password_hash: password::hash("password"),
            email: "student@example.com".to_string(),
            first_name: "Student".to_string(),
            last_name: "User".to_string(),
            role: Role::Student,
            department: Some("Engineering".to_string()),
            bio: Some("I love attending events".to_string()),
            profile_image: None,
            company: None,
            years_of_experience: None,
        })
        .await?;

        Ok(())
    }

    // ═══════════════════════════════════════════════════════════
    // User operations
    // ═══════════════════════════════════════════════════════════

    /// Insert a user and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn create_user(&self, new: NewUser) -> Result<User> {
        let mut users = lock(&self.users)?;
        let id = UserId(users.allocate());
        let user = User {
            id,
            username: new.username,
            password_hash: new.password_hash,
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            role: new.role,
            department: new.department,
            bio: new.bio,
            profile_image: new.profile_image,
            company: new.company,
            years_of_experience: new.years_of_experience,
        };
        users.rows.insert(id, user.clone());
        Ok(user)
    }

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(lock(&self.users)?.rows.get(&id).cloned())
    }

    /// Look up a user by username (linear scan).
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(lock(&self.users)?
            .rows
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    /// Look up a user by email (linear scan).
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(lock(&self.users)?
            .rows
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    /// Merge a partial update into an existing user.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<Option<User>> {
        let mut users = lock(&self.users)?;
        let Some(user) = users.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(department) = patch.department {
            user.department = Some(department);
        }
        if let Some(bio) = patch.bio {
            user.bio = Some(bio);
        }
        if let Some(profile_image) = patch.profile_image {
            user.profile_image = Some(profile_image);
        }
        if let Some(company) = patch.company {
            user.company = Some(company);
        }
        if let Some(years) = patch.years_of_experience {
            user.years_of_experience = Some(years);
        }
        Ok(Some(user.clone()))
    }

    // ═══════════════════════════════════════════════════════════
    // Event operations
    // ═══════════════════════════════════════════════════════════

    /// Insert an event and return the stored record.
    ///
    /// Price is coerced to 0 for free events regardless of the input value.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn create_event(&self, new: NewEvent) -> Result<Event> {
        let mut events = lock(&self.events)?;
        let id = EventId(events.allocate());
        let price = match new.event_type {
            EventType::Free => 0,
            EventType::Paid => new.price.unwrap_or(0),
        };
        let event = Event {
            id,
            title: new.title,
            description: new.description,
            location: new.location,
            event_date: new.event_date,
            category: new.category,
            event_type: new.event_type,
            price,
            capacity: new.capacity,
            banner_image: new.banner_image,
            organizer_id: new.organizer_id,
        };
        events.rows.insert(id, event.clone());
        Ok(event)
    }

    /// Look up an event by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn get_event(&self, id: EventId) -> Result<Option<Event>> {
        Ok(lock(&self.events)?.rows.get(&id).cloned())
    }

    /// All events, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn all_events(&self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = lock(&self.events)?.rows.values().cloned().collect();
        events.sort_by_key(|event| event.id);
        Ok(events)
    }

    /// Events in the given category, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn events_by_category(&self, category: EventCategory) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = lock(&self.events)?
            .rows
            .values()
            .filter(|event| event.category == category)
            .cloned()
            .collect();
        events.sort_by_key(|event| event.id);
        Ok(events)
    }

    /// Events organized by the given user, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn events_by_organizer(&self, organizer_id: UserId) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = lock(&self.events)?
            .rows
            .values()
            .filter(|event| event.organizer_id == organizer_id)
            .cloned()
            .collect();
        events.sort_by_key(|event| event.id);
        Ok(events)
    }

    /// Merge a partial update into an existing event.
    ///
    /// If the merged event is free its price is coerced back to 0.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn update_event(&self, id: EventId, patch: EventPatch) -> Result<Option<Event>> {
        let mut events = lock(&self.events)?;
        let Some(event) = events.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(description) = patch.description {
            event.description = description;
        }
        if let Some(location) = patch.location {
            event.location = location;
        }
        if let Some(event_date) = patch.event_date {
            event.event_date = event_date;
        }
        if let Some(category) = patch.category {
            event.category = category;
        }
        if let Some(event_type) = patch.event_type {
            event.event_type = event_type;
        }
        if let Some(price) = patch.price {
            event.price = price;
        }
        if let Some(capacity) = patch.capacity {
            event.capacity = capacity;
        }
        if let Some(banner_image) = patch.banner_image {
            event.banner_image = Some(banner_image);
        }
        if event.event_type == EventType::Free {
            event.price = 0;
        }
        Ok(Some(event.clone()))
    }

    /// Remove an event. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn delete_event(&self, id: EventId) -> Result<bool> {
        Ok(lock(&self.events)?.rows.remove(&id).is_some())
    }

    // ═══════════════════════════════════════════════════════════
    // Registration operations
    // ═══════════════════════════════════════════════════════════

    /// Insert a registration and return the stored record.
    ///
    /// The registration date is assigned here; attendance starts false.
    /// Invariant checks (duplicates, capacity, payment) belong to
    /// [`crate::registration::RegistrationService`], not the store.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn create_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
        has_paid: bool,
    ) -> Result<Registration> {
        let mut registrations = lock(&self.registrations)?;
        let id = RegistrationId(registrations.allocate());
        let registration = Registration {
            id,
            user_id,
            event_id,
            registration_date: Utc::now(),
            has_paid,
            has_attended: false,
        };
        registrations.rows.insert(id, registration.clone());
        Ok(registration)
    }

    /// Look up a registration by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn get_registration(&self, id: RegistrationId) -> Result<Option<Registration>> {
        Ok(lock(&self.registrations)?.rows.get(&id).cloned())
    }

    /// Look up the registration for a (user, event) pair, if any.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn registration_by_user_and_event(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<Registration>> {
        Ok(lock(&self.registrations)?
            .rows
            .values()
            .find(|reg| reg.user_id == user_id && reg.event_id == event_id)
            .cloned())
    }

    /// All registrations held by a user, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn registrations_by_user(&self, user_id: UserId) -> Result<Vec<Registration>> {
        let mut registrations: Vec<Registration> = lock(&self.registrations)?
            .rows
            .values()
            .filter(|reg| reg.user_id == user_id)
            .cloned()
            .collect();
        registrations.sort_by_key(|reg| reg.id);
        Ok(registrations)
    }

    /// All registrations for an event, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn registrations_by_event(&self, event_id: EventId) -> Result<Vec<Registration>> {
        let mut registrations: Vec<Registration> = lock(&self.registrations)?
            .rows
            .values()
            .filter(|reg| reg.event_id == event_id)
            .cloned()
            .collect();
        registrations.sort_by_key(|reg| reg.id);
        Ok(registrations)
    }

    /// Merge a partial update into an existing registration.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn update_registration(
        &self,
        id: RegistrationId,
        patch: RegistrationPatch,
    ) -> Result<Option<Registration>> {
        let mut registrations = lock(&self.registrations)?;
        let Some(registration) = registrations.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(has_paid) = patch.has_paid {
            registration.has_paid = has_paid;
        }
        if let Some(has_attended) = patch.has_attended {
            registration.has_attended = has_attended;
        }
        Ok(Some(registration.clone()))
    }

    /// Remove a registration. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn delete_registration(&self, id: RegistrationId) -> Result<bool> {
        Ok(lock(&self.registrations)?.rows.remove(&id).is_some())
    }

    // ═══════════════════════════════════════════════════════════
    // Notification operations
    // ═══════════════════════════════════════════════════════════

    /// Insert a notification and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn create_notification(
        &self,
        user_id: UserId,
        message: String,
        event_id: Option<EventId>,
    ) -> Result<Notification> {
        let mut notifications = lock(&self.notifications)?;
        let id = NotificationId(notifications.allocate());
        let notification = Notification {
            id,
            user_id,
            message,
            is_read: false,
            created_at: Utc::now(),
            event_id,
        };
        notifications.rows.insert(id, notification.clone());
        Ok(notification)
    }

    /// Look up a notification by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn get_notification(&self, id: NotificationId) -> Result<Option<Notification>> {
        Ok(lock(&self.notifications)?.rows.get(&id).cloned())
    }

    /// All notifications for a user, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn notifications_by_user(&self, user_id: UserId) -> Result<Vec<Notification>> {
        let mut notifications: Vec<Notification> = lock(&self.notifications)?
            .rows
            .values()
            .filter(|notification| notification.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by_key(|notification| notification.id);
        Ok(notifications)
    }

    /// Transition a notification's read flag false → true.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn mark_notification_read(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>> {
        let mut notifications = lock(&self.notifications)?;
        let Some(notification) = notifications.rows.get_mut(&id) else {
            return Ok(None);
        };
        notification.is_read = true;
        Ok(Some(notification.clone()))
    }

    // ═══════════════════════════════════════════════════════════
    // Analytics counts
    // ═══════════════════════════════════════════════════════════

    /// Number of attended registrations for an event.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn event_attendance_count(&self, event_id: EventId) -> Result<usize> {
        Ok(lock(&self.registrations)?
            .rows
            .values()
            .filter(|reg| reg.event_id == event_id && reg.has_attended)
            .count())
    }

    /// Number of events a user has attended.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn user_attendance_count(&self, user_id: UserId) -> Result<usize> {
        Ok(lock(&self.registrations)?
            .rows
            .values()
            .filter(|reg| reg.user_id == user_id && reg.has_attended)
            .count())
    }

    /// Number of events scheduled after `now`.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn upcoming_events_count(&self, now: DateTime<Utc>) -> Result<usize> {
        Ok(lock(&self.events)?
            .rows
            .values()
            .filter(|event| event.event_date > now)
            .count())
    }

    /// Number of registrations a user holds.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store lock is poisoned.
    pub async fn registered_events_count(&self, user_id: UserId) -> Result<usize> {
        Ok(lock(&self.registrations)?
            .rows
            .values()
            .filter(|reg| reg.user_id == user_id)
            .count())
    }
}
