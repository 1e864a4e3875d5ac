use chrono::NaiveDate;

use crate::domain::id::ResourceId;
use crate::domain::reservation::{Reservation, conflicts_with_any};

/// A candidate start time for a new reservation.
///
/// Ephemeral: computed on demand, never persisted. `start_minutes` counts
/// from midnight of the booking date and may exceed 1440 inside an overnight
/// opening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start_minutes: i64,
    pub available: bool,
}

impl TimeSlot {
    /// Clock label of the slot, e.g. minute 1470 renders as "00:30".
    pub fn label(&self) -> String {
        format!("{:02}:{:02}", (self.start_minutes / 60) % 24, self.start_minutes % 60)
    }
}

/// Lazy, finite, restartable sequence of candidate slots for one resource
/// and date, ascending by start time.
///
/// Each step advances by the configured granularity; availability of each
/// candidate is decided against the reservation snapshot the iterator was
/// built over. Cloning restarts the sequence from the first candidate.
#[derive(Debug, Clone)]
pub struct SlotIter<'a> {
    next_start: i64,
    last_start: i64,
    step: i64,
    resource_id: &'a ResourceId,
    date: NaiveDate,
    duration_minutes: i64,
    existing: &'a [Reservation],
}

impl<'a> SlotIter<'a> {
    pub(crate) fn new(
        first_start: i64,
        last_start: i64,
        step: i64,
        resource_id: &'a ResourceId,
        date: NaiveDate,
        duration_minutes: i64,
        existing: &'a [Reservation],
    ) -> Self {
        SlotIter { next_start: first_start, last_start, step, resource_id, date, duration_minutes, existing }
    }

    /// An exhausted sequence, used for holidays and windows the requested
    /// duration can no longer fit into.
    pub(crate) fn empty(resource_id: &'a ResourceId, date: NaiveDate) -> Self {
        SlotIter { next_start: 1, last_start: 0, step: 1, resource_id, date, duration_minutes: 0, existing: &[] }
    }
}

impl<'a> Iterator for SlotIter<'a> {
    type Item = TimeSlot;

    fn next(&mut self) -> Option<TimeSlot> {
        if self.next_start > self.last_start {
            return None;
        }

        let start = self.next_start;
        self.next_start += self.step;

        let conflict = conflicts_with_any(self.existing, self.resource_id, self.date, start, self.duration_minutes);

        Some(TimeSlot { start_minutes: start, available: !conflict })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_wraps_past_midnight() {
        assert_eq!(TimeSlot { start_minutes: 16 * 60, available: true }.label(), "16:00");
        assert_eq!(TimeSlot { start_minutes: 1470, available: false }.label(), "00:30");
    }

    #[test]
    fn empty_iterator_yields_nothing() {
        let resource_id = ResourceId::new("sim-01");
        let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();

        assert_eq!(SlotIter::empty(&resource_id, date).count(), 0);
    }
}
