use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

use crate::domain::clock::SharedClock;
use crate::domain::id::{ReservationId, ResourceId};
use crate::domain::pricing::PricingPolicy;
use crate::domain::reservation::{Reservation, ReservationPatch, ReservationStatus};
use crate::domain::resource::ResourceCatalog;
use crate::domain::scheduler::{ReservationCandidate, SlotScheduler};
use crate::domain::slot::TimeSlot;
use crate::domain::store::ReservationStore;
use crate::domain::user::UserContext;
use crate::error::ValidationError;

/// Outcome of a cancel request. Cancelling an already-cancelled reservation
/// is an idempotent no-op, reported as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    AlreadyCancelled,
}

/// Caller-facing facade over the slot scheduler and the reservation store.
///
/// This is the system's single serialization point: `submit_reservation`
/// holds the submission gate across "read complete reservation set ->
/// validate -> durable append", so two simultaneous overlapping submissions
/// for the same resource and date cannot both pass validation.
#[derive(Debug)]
pub struct BookingService {
    catalog: ResourceCatalog,
    scheduler: SlotScheduler,
    pricing: PricingPolicy,
    store: Arc<dyn ReservationStore>,
    clock: SharedClock,
    submission_gate: Mutex<()>,
}

impl BookingService {
    pub fn new(catalog: ResourceCatalog, scheduler: SlotScheduler, pricing: PricingPolicy, store: Arc<dyn ReservationStore>, clock: SharedClock) -> Self {
        BookingService { catalog, scheduler, pricing, store, clock, submission_gate: Mutex::new(()) }
    }

    /// Computes the candidate slots for one resource, date and duration.
    pub fn get_available_slots(&self, resource_id: &ResourceId, date: NaiveDate, duration_minutes: i64) -> Result<Vec<TimeSlot>, ValidationError> {
        if duration_minutes <= 0 {
            return Err(ValidationError::InvalidDuration(duration_minutes));
        }

        if self.catalog.get(resource_id).is_none() {
            return Err(ValidationError::UnknownResource(resource_id.clone()));
        }

        let existing = self.store.list(Some(resource_id), Some(date))?;
        let now = self.clock.now();

        let slots: Vec<TimeSlot> = self.scheduler.generate_time_slots(date, resource_id, duration_minutes, &existing, now).collect();

        log::debug!("Computed {} slot(s) for resource '{}' on {}.", slots.len(), resource_id, date);

        Ok(slots)
    }

    /// Validates, prices and durably records a new reservation.
    ///
    /// The returned reservation is already persisted; `Confirmed` is only
    /// ever reported after the store's `append` has succeeded.
    pub fn submit_reservation(&self, candidate: ReservationCandidate, caller: &UserContext) -> Result<Reservation, ValidationError> {
        let _gate = self.submission_gate.lock().expect("Mutex poisoned");

        let resource = self.catalog.get(&candidate.resource_id).ok_or_else(|| ValidationError::UnknownResource(candidate.resource_id.clone()))?;

        // The complete, latest set for this resource and date
        let existing = self.store.list(Some(&candidate.resource_id), Some(candidate.date))?;

        let reservation = self.scheduler.validate_and_submit(candidate, caller, resource, &self.pricing, &existing)?;

        self.store.append(reservation.clone())?;

        log::info!(
            "Confirmed reservation {} for resource '{}' on {} at {} ({} min, {} participant(s), price {:.2}).",
            reservation.id,
            reservation.resource_id,
            reservation.date,
            reservation.start_minutes,
            reservation.duration_minutes,
            reservation.participants,
            reservation.price
        );

        Ok(reservation)
    }

    /// Soft-cancels a reservation on behalf of its owner or an administrator.
    pub fn cancel(&self, reservation_id: ReservationId, caller: &UserContext) -> Result<CancelOutcome, ValidationError> {
        let reservation = self.store.get(reservation_id)?.ok_or(ValidationError::NotFound(reservation_id))?;

        if reservation.user_id != caller.user_id && !caller.is_admin() {
            return Err(ValidationError::Forbidden);
        }

        match reservation.effective_status(self.clock.now()) {
            ReservationStatus::Cancelled => {
                log::debug!("Reservation {} is already cancelled; nothing to do.", reservation_id);
                Ok(CancelOutcome::AlreadyCancelled)
            }
            ReservationStatus::Completed => Err(ValidationError::AlreadyCompleted(reservation_id)),
            ReservationStatus::Confirmed => {
                self.store.update(reservation_id, ReservationPatch::set_status(ReservationStatus::Cancelled))?;

                log::info!("Cancelled reservation {} on behalf of user '{}'.", reservation_id, caller.user_id);

                Ok(CancelOutcome::Cancelled)
            }
        }
    }

    /// Lists reservations with their effective status: confirmed records
    /// whose session end has passed are reported as `Completed`.
    pub fn list_reservations(&self, resource_id: Option<&ResourceId>, date: Option<NaiveDate>) -> Result<Vec<Reservation>, ValidationError> {
        let now = self.clock.now();

        let reservations = self
            .store
            .list(resource_id, date)?
            .into_iter()
            .map(|mut reservation| {
                reservation.status = reservation.effective_status(now);
                reservation
            })
            .collect();

        Ok(reservations)
    }
}
