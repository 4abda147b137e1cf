//! Registration workflow.
//!
//! The one place with nontrivial business logic: all invariants of the
//! [`Registration`] entity are enforced here, in order — event existence,
//! duplicate prevention, capacity, and payment gating — before the
//! registration is committed and a confirmation notification emitted.
//!
//! The check-and-act sequence runs under a per-event async mutex, so two
//! concurrent registrations for the last capacity slot cannot both pass the
//! capacity check before either commits.

use crate::error::{DomainError, Result};
use crate::model::{EventId, EventType, Registration, RegistrationId, UserId};
use crate::store::MemoryStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Registry of per-event locks.
///
/// Locks are created on first use and kept for the process lifetime; the
/// event population of a campus tool is small enough that the registry never
/// needs eviction.
#[derive(Debug, Default)]
struct EventLocks {
    inner: Mutex<HashMap<EventId, Arc<tokio::sync::Mutex<()>>>>,
}

impl EventLocks {
    fn lock_for(&self, event_id: EventId) -> Result<Arc<tokio::sync::Mutex<()>>> {
        let mut locks = self
            .inner
            .lock()
            .map_err(|_| DomainError::Internal("lock registry poisoned".to_string()))?;
        Ok(Arc::clone(locks.entry(event_id).or_default()))
    }
}

/// Enforces the registration invariants over a shared [`MemoryStore`].
#[derive(Debug)]
pub struct RegistrationService {
    store: Arc<MemoryStore>,
    locks: EventLocks,
}

impl RegistrationService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            locks: EventLocks::default(),
        }
    }

    /// Register `user_id` for `event_id`.
    ///
    /// The checks run in a fixed order so a duplicate registration is
    /// reported as such even when the event is also full.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NotFound`] if the event does not exist
    /// - [`DomainError::AlreadyRegistered`] if the user already holds a
    ///   registration for this event
    /// - [`DomainError::CapacityReached`] if the event is full
    /// - [`DomainError::PaymentRequired`] if the event is paid and
    ///   `has_paid` is false
    pub async fn register(
        &self,
        user_id: UserId,
        event_id: EventId,
        has_paid: bool,
    ) -> Result<Registration> {
        let event_lock = self.locks.lock_for(event_id)?;
        let _guard = event_lock.lock().await;

        let event = self
            .store
            .get_event(event_id)
            .await?
            .ok_or(DomainError::not_found("Event"))?;

        if self
            .store
            .registration_by_user_and_event(user_id, event_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyRegistered);
        }

        let registered = self.store.registrations_by_event(event_id).await?.len();
        if registered >= event.capacity as usize {
            return Err(DomainError::CapacityReached);
        }

        if event.event_type == EventType::Paid && !has_paid {
            return Err(DomainError::PaymentRequired);
        }

        // Free events are always considered paid.
        let has_paid = match event.event_type {
            EventType::Free => true,
            EventType::Paid => has_paid,
        };

        let registration = self
            .store
            .create_registration(user_id, event_id, has_paid)
            .await?;

        self.store
            .create_notification(
                user_id,
                format!("You have successfully registered for {}", event.title),
                Some(event_id),
            )
            .await?;

        info!(
            user_id = %user_id,
            event_id = %event_id,
            registration_id = %registration.id,
            "registration created"
        );

        Ok(registration)
    }

    /// Delete a registration on behalf of its owner, freeing a capacity slot.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] if the registration does not exist
    /// or belongs to a different user — the same error in both cases, so the
    /// endpoint is not an existence oracle.
    pub async fn unregister(
        &self,
        user_id: UserId,
        registration_id: RegistrationId,
    ) -> Result<()> {
        let registration = self
            .store
            .get_registration(registration_id)
            .await?
            .filter(|reg| reg.user_id == user_id)
            .ok_or(DomainError::not_found("Registration"))?;

        self.store.delete_registration(registration.id).await?;
        info!(
            user_id = %user_id,
            registration_id = %registration.id,
            "registration deleted"
        );
        Ok(())
    }
}
