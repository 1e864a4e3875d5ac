use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::domain::id::{ReservationId, ResourceId, UserId};

/// Defines the lifecycle state of a reservation within the system.
///
/// The only permitted transitions are:
/// 1. `Confirmed -> Cancelled` (terminal, one-way, by the owner or an administrator)
/// 2. `Confirmed -> Completed` (terminal, time-driven: the session's end time
///    has passed; inferred on read, never actively scheduled)
///
/// Reservations are never physically deleted. Soft-cancelled records are kept
/// for history and audit and no longer count towards conflicts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ReservationStatus {
    /// The reservation was validated, priced and durably recorded.
    Confirmed,

    /// The reservation was soft-cancelled by its owner or an administrator.
    Cancelled,

    /// The booked session's end time has passed.
    Completed,
}

/// One booked interval on one simulator.
///
/// `start_minutes` counts from midnight of the booking `date` and may exceed
/// 1440 for past-midnight starts inside an overnight opening window, so the
/// interval arithmetic stays on a single axis per date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub resource_id: ResourceId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub start_minutes: i64,
    pub duration_minutes: i64,
    pub status: ReservationStatus,
    pub participants: u32,
    pub price: f64,
}

impl Reservation {
    pub fn end_minutes(&self) -> i64 {
        self.start_minutes + self.duration_minutes
    }

    /// Cancelled reservations never participate in conflict detection.
    pub fn blocks_slot(&self) -> bool {
        self.status != ReservationStatus::Cancelled
    }

    /// Half-open interval overlap against a candidate `[start, start + duration)`.
    pub fn overlaps(&self, start_minutes: i64, duration_minutes: i64) -> bool {
        intervals_overlap(self.start_minutes, self.duration_minutes, start_minutes, duration_minutes)
    }

    /// The wall-clock end of the booked session.
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.date.and_hms_opt(0, 0, 0).expect("midnight is always valid") + TimeDelta::minutes(self.end_minutes())
    }

    /// The status as reported to callers: a confirmed reservation whose end
    /// time has passed is `Completed`, without any stored mutation.
    pub fn effective_status(&self, now: NaiveDateTime) -> ReservationStatus {
        if self.status == ReservationStatus::Confirmed && self.end_datetime() <= now {
            return ReservationStatus::Completed;
        }

        self.status
    }
}

/// Standard half-open interval overlap test: `[s1, s1+d1)` and `[s2, s2+d2)`
/// conflict iff `s1 < s2 + d2 && s2 < s1 + d1`. Symmetric in its arguments.
pub fn intervals_overlap(s1: i64, d1: i64, s2: i64, d2: i64) -> bool {
    s1 < s2 + d2 && s2 < s1 + d1
}

/// Tests a candidate interval against every blocking reservation of the same
/// resource and date. This predicate is the sole invariant-preserving check
/// in the system: as long as every accepted submission passes it against the
/// complete, latest reservation set, the non-cancelled intervals of any
/// resource/date pair stay pairwise non-overlapping.
pub fn conflicts_with_any(existing: &[Reservation], resource_id: &ResourceId, date: NaiveDate, start_minutes: i64, duration_minutes: i64) -> bool {
    existing
        .iter()
        .filter(|reservation| reservation.resource_id == *resource_id && reservation.date == date && reservation.blocks_slot())
        .any(|reservation| reservation.overlaps(start_minutes, duration_minutes))
}

/// Partial update applied by the store's `update` operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationPatch {
    pub status: Option<ReservationStatus>,
}

impl ReservationPatch {
    pub fn set_status(status: ReservationStatus) -> Self {
        ReservationPatch { status: Some(status) }
    }

    pub fn apply(&self, reservation: &mut Reservation) {
        if let Some(status) = self.status {
            reservation.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::{ResourceId, UserId};

    fn reservation(start_minutes: i64, duration_minutes: i64, status: ReservationStatus) -> Reservation {
        Reservation {
            id: ReservationId::generate(),
            resource_id: ResourceId::new("sim-01"),
            user_id: UserId::new("driver-1"),
            date: NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
            start_minutes,
            duration_minutes,
            status,
            participants: 1,
            price: 25.0,
        }
    }

    #[test]
    fn overlap_is_symmetric() {
        let pairs = [(600, 60, 630, 60), (600, 60, 660, 60), (30, 60, 60, 90), (0, 1440, 720, 10)];

        for (s1, d1, s2, d2) in pairs {
            assert_eq!(intervals_overlap(s1, d1, s2, d2), intervals_overlap(s2, d2, s1, d1), "symmetry violated for ({}, {}, {}, {})", s1, d1, s2, d2);
        }
    }

    #[test]
    fn back_to_back_intervals_do_not_overlap() {
        // 10:00-11:00 and 11:00-12:00 share only the boundary point
        assert!(!intervals_overlap(600, 60, 660, 60));
        assert!(!intervals_overlap(660, 60, 600, 60));
    }

    #[test]
    fn cancelled_reservations_never_conflict() {
        let existing = vec![reservation(600, 60, ReservationStatus::Cancelled)];
        let resource_id = ResourceId::new("sim-01");
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();

        assert!(!conflicts_with_any(&existing, &resource_id, date, 600, 60));
    }

    #[test]
    fn other_resource_or_date_never_conflicts() {
        let existing = vec![reservation(600, 60, ReservationStatus::Confirmed)];
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let other_date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();

        assert!(!conflicts_with_any(&existing, &ResourceId::new("sim-02"), date, 600, 60));
        assert!(!conflicts_with_any(&existing, &ResourceId::new("sim-01"), other_date, 600, 60));
        assert!(conflicts_with_any(&existing, &ResourceId::new("sim-01"), date, 630, 60));
    }

    #[test]
    fn confirmed_reservation_completes_once_its_end_has_passed() {
        let booked = reservation(600, 60, ReservationStatus::Confirmed);

        let before_end = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap().and_hms_opt(10, 30, 0).unwrap();
        let after_end = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap().and_hms_opt(11, 0, 0).unwrap();

        assert_eq!(booked.effective_status(before_end), ReservationStatus::Confirmed);
        assert_eq!(booked.effective_status(after_end), ReservationStatus::Completed);

        // Cancelled stays cancelled even after the interval has passed
        let cancelled = reservation(600, 60, ReservationStatus::Cancelled);
        assert_eq!(cancelled.effective_status(after_end), ReservationStatus::Cancelled);
    }
}
