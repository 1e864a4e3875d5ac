use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::id::ResourceId;
use crate::domain::scheduler::ReservationCandidate;
use crate::error::{Error, Result};

/// A reservation request as submitted by the presentation layer.
///
/// Dates are "YYYY-MM-DD", times are "HH:MM" clock times of the booking
/// date; past-midnight clock times under an overnight window are accepted
/// and normalized by the domain.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequestDto {
    pub resource_id: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: i64,
    pub participants: u32,
}

impl ReservationRequestDto {
    /// Converts the wire shape into a validated candidate. Shape errors
    /// (unparseable date/time, non-positive duration) are infrastructure
    /// errors, not business-rule violations.
    pub fn to_candidate(&self) -> Result<ReservationCandidate> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| Error::ConfigError(format!("Invalid date '{}': {}", self.date, e)))?;

        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").map_err(|e| Error::ConfigError(format!("Invalid time '{}': {}", self.time, e)))?;

        if self.duration_minutes <= 0 {
            return Err(Error::ConfigError(format!("Duration of {} minutes is not bookable.", self.duration_minutes)));
        }

        if self.participants == 0 {
            return Err(Error::ConfigError("At least one participant is required.".to_string()));
        }

        Ok(ReservationCandidate {
            resource_id: ResourceId::new(self.resource_id.clone()),
            date,
            start_minutes: time.hour() as i64 * 60 + time.minute() as i64,
            duration_minutes: self.duration_minutes,
            participants: self.participants,
        })
    }
}
