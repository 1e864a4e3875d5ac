use chrono::{Datelike, NaiveDate};

use crate::api::config_dto::{BusinessHoursDto, HolidayDto, HoursWindowDto};
use crate::error::{Error, Result};

pub const MINUTES_PER_DAY: i64 = 1440;

/// Classification of one calendar date for opening-hours purposes.
///
/// A holiday always takes precedence over the weekday/weekend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    Weekday,
    Weekend,
    Holiday,
}

/// One open/close window, expressed as integer hours.
///
/// `close` may exceed 24 to express a past-midnight closing time, e.g.
/// close at hour 26 means the resource stays open until 2 AM of the next
/// calendar day while still belonging to the booking date's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursWindow {
    pub open: i64,
    pub close: i64,
}

impl HoursWindow {
    pub fn new(open: i64, close: i64) -> Result<Self> {
        if !(0..24).contains(&open) {
            return Err(Error::ConfigError(format!("Opening hour {} must lie within 0..24.", open)));
        }

        if open >= close {
            return Err(Error::ConfigError(format!("Opening hour {} must be before closing hour {}.", open, close)));
        }

        if close > 48 {
            return Err(Error::ConfigError(format!("Closing hour {} may spill into the next day, but not beyond it.", close)));
        }

        Ok(HoursWindow { open, close })
    }

    pub fn from_dto(dto: HoursWindowDto) -> Result<Self> {
        HoursWindow::new(dto.open, dto.close)
    }

    pub fn open_minutes(&self) -> i64 {
        self.open * 60
    }

    pub fn close_minutes(&self) -> i64 {
        self.close * 60
    }

    /// Maps a clock time onto this window's time axis.
    ///
    /// For an overnight window (close > 24), a clock time that falls into the
    /// spillover segment after midnight belongs to the *previous* booking
    /// date, so it is shifted by one day. A request for 00:30 under a
    /// 14:00-26:00 window is treated as minute 1470 of the booking date.
    pub fn normalize_minutes(&self, minutes: i64) -> i64 {
        if self.close_minutes() > MINUTES_PER_DAY && minutes < self.close_minutes() - MINUTES_PER_DAY { minutes + MINUTES_PER_DAY } else { minutes }
    }

    /// Tests whether a (normalized) clock time lies within `[open, close)`.
    pub fn contains(&self, minutes: i64) -> bool {
        let normalized = self.normalize_minutes(minutes);
        self.open_minutes() <= normalized && normalized < self.close_minutes()
    }
}

/// A recurring closed day, matched by month and day regardless of year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holiday {
    pub month: u32,
    pub day: u32,
}

impl Holiday {
    pub fn new(month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(Error::ConfigError(format!("Holiday (month: {}, day: {}) is not a valid calendar date.", month, day)));
        }

        Ok(Holiday { month, day })
    }

    pub fn from_dto(dto: HolidayDto) -> Result<Self> {
        Holiday::new(dto.month, dto.day)
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

/// The authoritative opening-hours configuration.
///
/// Injected once at startup; the scheduler never hardcodes hour constants.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessHours {
    weekday: HoursWindow,
    weekend: HoursWindow,
    holidays: Vec<Holiday>,
}

impl BusinessHours {
    pub fn new(weekday: HoursWindow, weekend: HoursWindow, holidays: Vec<Holiday>) -> Self {
        BusinessHours { weekday, weekend, holidays }
    }

    pub fn from_dto(dto: BusinessHoursDto) -> Result<Self> {
        let weekday = HoursWindow::from_dto(dto.weekday)?;
        let weekend = HoursWindow::from_dto(dto.weekend)?;

        let holidays = dto.holidays.into_iter().map(Holiday::from_dto).collect::<Result<Vec<Holiday>>>()?;

        Ok(BusinessHours::new(weekday, weekend, holidays))
    }

    /// Classifies a calendar date. Holidays win over the day-of-week split.
    pub fn classify(&self, date: NaiveDate) -> DayClass {
        if self.holidays.iter().any(|holiday| holiday.matches(date)) {
            return DayClass::Holiday;
        }

        if date.weekday().number_from_monday() <= 5 { DayClass::Weekday } else { DayClass::Weekend }
    }

    /// Returns the open/close window for a date, or `None` on holidays.
    pub fn window_for(&self, date: NaiveDate) -> Option<&HoursWindow> {
        match self.classify(date) {
            DayClass::Weekday => Some(&self.weekday),
            DayClass::Weekend => Some(&self.weekend),
            DayClass::Holiday => None,
        }
    }

    /// Tests whether a clock time (minutes since midnight of the booking
    /// date) falls within the date's open window. Holidays are always closed.
    pub fn is_within(&self, date: NaiveDate, minutes: i64) -> bool {
        match self.window_for(date) {
            Some(window) => window.contains(minutes),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours() -> BusinessHours {
        let weekday = HoursWindow::new(16, 24).unwrap();
        let weekend = HoursWindow::new(14, 26).unwrap();
        BusinessHours::new(weekday, weekend, vec![Holiday::new(12, 25).unwrap()])
    }

    #[test]
    fn holiday_takes_precedence_over_weekday() {
        // 2026-12-25 is a Friday
        let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        assert_eq!(hours().classify(date), DayClass::Holiday);
        assert!(hours().window_for(date).is_none());
        assert!(!hours().is_within(date, 18 * 60));
    }

    #[test]
    fn weekday_window_is_half_open() {
        // 2026-08-24 is a Monday
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert!(!hours().is_within(date, 15 * 60 + 30));
        assert!(hours().is_within(date, 16 * 60));
        assert!(hours().is_within(date, 23 * 60 + 59));
        assert!(!hours().is_within(date, 24 * 60));
    }

    #[test]
    fn overnight_window_accepts_past_midnight_times() {
        // 2026-08-22 is a Saturday, open 14:00-26:00
        let date = NaiveDate::from_ymd_opt(2026, 8, 22).unwrap();
        assert!(hours().is_within(date, 30)); // 00:30, normalized to 24:30
        assert!(hours().is_within(date, 25 * 60)); // already normalized 01:00
        assert!(!hours().is_within(date, 2 * 60)); // 02:00 is past closing
        assert!(!hours().is_within(date, 13 * 60));
    }

    #[test]
    fn invalid_windows_are_rejected() {
        assert!(HoursWindow::new(18, 18).is_err());
        assert!(HoursWindow::new(24, 26).is_err());
        assert!(HoursWindow::new(10, 50).is_err());
        assert!(Holiday::new(13, 1).is_err());
    }
}
