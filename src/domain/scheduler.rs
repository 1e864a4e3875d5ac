use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::domain::business_hours::BusinessHours;
use crate::domain::id::{ReservationId, ResourceId};
use crate::domain::pricing::PricingPolicy;
use crate::domain::reservation::{Reservation, ReservationStatus, conflicts_with_any};
use crate::domain::resource::Resource;
use crate::domain::slot::SlotIter;
use crate::domain::user::UserContext;
use crate::error::{Error, Result, ValidationError};

/// A proposed reservation before validation. Carries no identity, status or
/// price; those are assigned by `validate_and_submit` on success.
#[derive(Debug, Clone)]
pub struct ReservationCandidate {
    pub resource_id: ResourceId,
    pub date: NaiveDate,
    pub start_minutes: i64,
    pub duration_minutes: i64,
    pub participants: u32,
}

/// The slot scheduler: computes available start times for one simulator and
/// date, and validates proposed reservations against the existing set.
///
/// Pure and synchronous. The scheduler never touches persistence; it reads a
/// reservation snapshot handed in by the caller and returns values. The
/// caller (see `BookingService`) owns the serialization point that makes the
/// read-validate-append sequence safe under concurrent submissions.
#[derive(Debug, Clone)]
pub struct SlotScheduler {
    hours: BusinessHours,
    granularity_minutes: i64,
}

impl SlotScheduler {
    pub fn new(hours: BusinessHours, granularity_minutes: i64) -> Result<Self> {
        if granularity_minutes <= 0 || granularity_minutes > 24 * 60 {
            return Err(Error::ConfigError(format!("Slot granularity of {} minutes is not usable.", granularity_minutes)));
        }

        Ok(SlotScheduler { hours, granularity_minutes })
    }

    /// Tests whether a clock time (minutes since midnight of the booking
    /// date) falls within the date's open window. Holidays are always closed.
    /// No side effects.
    pub fn is_within_business_hours(&self, date: NaiveDate, minutes: i64) -> bool {
        self.hours.is_within(date, minutes)
    }

    /// Half-open interval conflict test against all non-cancelled
    /// reservations of the same resource and date.
    pub fn has_conflict(&self, resource_id: &ResourceId, date: NaiveDate, start_minutes: i64, duration_minutes: i64, existing: &[Reservation]) -> bool {
        conflicts_with_any(existing, resource_id, date, start_minutes, duration_minutes)
    }

    /// Produces the ordered candidate slots for one resource, date and
    /// requested duration.
    ///
    /// Candidates step through the open window at the configured granularity.
    /// The last candidate is capped at `close - ceil(duration / 60)` hours so
    /// a booking started there still fits before closing. When `date` is the
    /// clock's today, no candidate earlier than `now + 1h` is offered. On
    /// holidays, and for non-positive durations, the sequence is empty.
    pub fn generate_time_slots<'a>(
        &self,
        date: NaiveDate,
        resource_id: &'a ResourceId,
        duration_minutes: i64,
        existing: &'a [Reservation],
        now: NaiveDateTime,
    ) -> SlotIter<'a> {
        if duration_minutes <= 0 {
            return SlotIter::empty(resource_id, date);
        }

        let window = match self.hours.window_for(date) {
            Some(window) => window,
            None => return SlotIter::empty(resource_id, date),
        };

        let mut first_start = window.open_minutes();

        // Past-time exclusion with a one hour lead buffer, for today only
        if date == now.date() {
            let earliest = (now.hour() as i64 + 1) * 60;
            first_start = first_start.max(earliest);
        }

        // Keep candidates on the granularity grid anchored at the open hour
        let offset = (first_start - window.open_minutes()) % self.granularity_minutes;
        if offset != 0 {
            first_start += self.granularity_minutes - offset;
        }

        let duration_hours = (duration_minutes + 59) / 60;
        let last_start = window.close_minutes() - duration_hours * 60;

        if first_start > last_start {
            return SlotIter::empty(resource_id, date);
        }

        SlotIter::new(first_start, last_start, self.granularity_minutes, resource_id, date, duration_minutes, existing)
    }

    /// Validates a candidate and, on success, constructs the confirmed
    /// reservation for the caller to persist.
    ///
    /// Checks run in order and short-circuit on the first failure: request
    /// shape, then business hours, then resource capability, then conflict
    /// detection. No partial mutation occurs on failure; this function is a
    /// pure validator plus constructor.
    pub fn validate_and_submit(
        &self,
        candidate: ReservationCandidate,
        caller: &UserContext,
        resource: &Resource,
        pricing: &PricingPolicy,
        existing: &[Reservation],
    ) -> std::result::Result<Reservation, ValidationError> {
        debug_assert!(candidate.resource_id == resource.id, "Callers must pass the catalog entry matching the candidate's resource id.");

        if candidate.duration_minutes <= 0 {
            return Err(ValidationError::InvalidDuration(candidate.duration_minutes));
        }

        if candidate.participants == 0 {
            return Err(ValidationError::NoParticipants);
        }

        if !self.is_within_business_hours(candidate.date, candidate.start_minutes) {
            return Err(ValidationError::OutsideBusinessHours);
        }

        if !caller.can_access(resource.category) {
            return Err(ValidationError::AccessDenied);
        }

        // The window exists, the business-hours check passed on it
        let window = self.hours.window_for(candidate.date).expect("window checked above");
        let start_minutes = window.normalize_minutes(candidate.start_minutes);

        if self.has_conflict(&candidate.resource_id, candidate.date, start_minutes, candidate.duration_minutes, existing) {
            return Err(ValidationError::SlotUnavailable);
        }

        let price = pricing.price(resource.base_price, candidate.duration_minutes, candidate.participants);

        Ok(Reservation {
            id: ReservationId::generate(),
            resource_id: candidate.resource_id,
            user_id: caller.user_id.clone(),
            date: candidate.date,
            start_minutes,
            duration_minutes: candidate.duration_minutes,
            status: ReservationStatus::Confirmed,
            participants: candidate.participants,
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::business_hours::{Holiday, HoursWindow};

    fn scheduler(granularity: i64) -> SlotScheduler {
        let hours = BusinessHours::new(HoursWindow::new(16, 24).unwrap(), HoursWindow::new(14, 26).unwrap(), vec![Holiday::new(12, 25).unwrap()]);
        SlotScheduler::new(hours, granularity).unwrap()
    }

    fn far_in_the_past() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn last_slot_still_fits_before_closing() {
        let resource_id = ResourceId::new("sim-01");
        // Monday, window 16:00-24:00, duration 90 -> ceil to 2h -> last start 22:00
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();

        let slots: Vec<_> = scheduler(60).generate_time_slots(date, &resource_id, 90, &[], far_in_the_past()).collect();

        assert_eq!(slots.first().map(|slot| slot.start_minutes), Some(16 * 60));
        assert_eq!(slots.last().map(|slot| slot.start_minutes), Some(22 * 60));
    }

    #[test]
    fn lead_buffer_snaps_to_the_granularity_grid() {
        let resource_id = ResourceId::new("sim-01");
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        // 16:25 today -> earliest offer 17:00, already on the hourly grid
        let now = date.and_hms_opt(16, 25, 0).unwrap();

        let slots: Vec<_> = scheduler(60).generate_time_slots(date, &resource_id, 60, &[], now).collect();
        assert_eq!(slots.first().map(|slot| slot.start_minutes), Some(17 * 60));

        // With 45-minute granularity the 17:00 buffer rounds up to 17:30 (16:00 + 2 * 45min)
        let slots: Vec<_> = scheduler(45).generate_time_slots(date, &resource_id, 60, &[], now).collect();
        assert_eq!(slots.first().map(|slot| slot.start_minutes), Some(17 * 60 + 30));
    }

    #[test]
    fn duration_longer_than_the_window_yields_no_slots() {
        let resource_id = ResourceId::new("sim-01");
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();

        let slots: Vec<_> = scheduler(60).generate_time_slots(date, &resource_id, 9 * 60, &[], far_in_the_past()).collect();
        assert!(slots.is_empty());
    }

    #[test]
    fn slot_iterator_is_restartable() {
        let resource_id = ResourceId::new("sim-01");
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();

        let iter = scheduler(60).generate_time_slots(date, &resource_id, 60, &[], far_in_the_past());
        let first_pass: Vec<_> = iter.clone().collect();
        let second_pass: Vec<_> = iter.collect();

        assert_eq!(first_pass, second_pass);
        assert!(!first_pass.is_empty());
    }
}
