#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

use simrace_booking::domain::clock::{Clock, SharedClock};

/// Clock pinned to a fixed moment, so slot generation and the past-time
/// exclusion rule stay deterministic in tests.
#[derive(Debug, Clone)]
pub struct MockClock {
    now: NaiveDateTime,
}

impl MockClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> MockClock {
        let now = NaiveDate::from_ymd_opt(year, month, day).expect("valid test date").and_hms_opt(hour, minute, 0).expect("valid test time");

        MockClock { now }
    }

    pub fn shared(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> SharedClock {
        SharedClock(Arc::new(MockClock::at(year, month, day, hour, minute)))
    }

    /// A moment far before every date the tests book, so no slot is ever
    /// excluded as "in the past".
    pub fn far_in_the_past() -> SharedClock {
        MockClock::shared(2020, 1, 1, 0, 0)
    }
}

impl Clock for MockClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }

    // Required method to enable cloning of the trait object
    fn clone_box(&self) -> SharedClock {
        SharedClock(Arc::new(self.clone()))
    }
}
