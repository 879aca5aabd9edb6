// Test fixtures - reusable test data
// Provides consistent events and dates across the integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use chronos_calendar::models::event::{Event, EventId};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday 3 March 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    /// Sunday 9 March 2025, the end of the week starting on [`monday`]
    pub fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    /// `day_offset` days after [`monday`] at `hour:minute`
    pub fn at(day_offset: i64, hour: u32, minute: u32) -> NaiveDateTime {
        (monday() + chrono::Duration::days(day_offset))
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Persisted timed event on [`dates::monday`]
    pub fn timed(id: i64, from: (u32, u32), to: (u32, u32)) -> Event {
        Event::builder()
            .id(EventId::Persisted(id))
            .title(format!("Event {}", id))
            .start(dates::at(0, from.0, from.1))
            .end(dates::at(0, to.0, to.1))
            .category_id(1)
            .build()
            .unwrap()
    }

    /// Persisted all-day event covering whole days from `first` through `last` (offsets from Monday)
    pub fn all_day(id: i64, first: i64, last: i64) -> Event {
        Event::builder()
            .id(EventId::Persisted(id))
            .title(format!("All day {}", id))
            .start(dates::at(first, 0, 0))
            .end(dates::at(last, 23, 59))
            .all_day(true)
            .build()
            .unwrap()
    }
}
