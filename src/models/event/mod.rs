// Event module
// Calendar event model used by the layout engine, queries and drag gestures

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::interval::TimeInterval;

/// Placeholder shown for events without a title
pub const UNTITLED: &str = "(No title)";

/// Identity of an event within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventId {
    /// Acknowledged by the event store
    Persisted(i64),
    /// Inserted locally, waiting for the store to acknowledge it
    Pending(u64),
    /// In-progress preview that is never persisted
    Draft,
}

impl EventId {
    pub fn is_draft(&self) -> bool {
        matches!(self, EventId::Draft)
    }

    pub fn persisted(&self) -> Option<i64> {
        match self {
            EventId::Persisted(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Persisted(id) => write!(f, "{}", id),
            EventId::Pending(id) => write!(f, "pending-{}", id),
            EventId::Draft => write!(f, "preview"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("Event start time is required")]
    MissingStart,
    #[error("Event end time is required")]
    MissingEnd,
    #[error("Event end time must not be before start time")]
    EndBeforeStart,
}

/// Calendar event on the local wall clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub category_id: Option<i64>,
}

impl Event {
    /// Create a new, not yet persisted event
    ///
    /// # Examples
    /// ```
    /// use chronos_calendar::models::event::Event;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new("Team Meeting", start, end).unwrap();
    /// assert!(event.id.is_draft());
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventValidationError> {
        let event = Self {
            id: EventId::Draft,
            title: title.into(),
            description: None,
            location: None,
            start,
            end,
            all_day: false,
            category_id: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Preview event for an in-progress creation drag.
    ///
    /// The endpoints may arrive in any order; they are stored sorted.
    pub fn preview(a: NaiveDateTime, b: NaiveDateTime, category_id: Option<i64>) -> Self {
        let (start, end) = crate::models::interval::sorted_pair(a, b);
        Self {
            id: EventId::Draft,
            title: String::new(),
            description: None,
            location: None,
            start,
            end,
            all_day: false,
            category_id,
        }
    }

    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.end < self.start {
            return Err(EventValidationError::EndBeforeStart);
        }
        Ok(())
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_draft()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Title to render, falling back to a placeholder for empty titles
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Copy of this event with the given interval
    pub fn with_times(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    /// Copy of this event moved by whole calendar days
    pub fn shifted_by_days(&self, days: i64) -> Self {
        let delta = Duration::days(days);
        self.with_times(self.start + delta, self.end + delta)
    }
}

impl TimeInterval for Event {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<EventId>,
    title: String,
    description: Option<String>,
    location: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    all_day: bool,
    category_id: Option<i64>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn build(self) -> Result<Event, EventValidationError> {
        let start = self.start.ok_or(EventValidationError::MissingStart)?;
        let end = self.end.ok_or(EventValidationError::MissingEnd)?;

        let event = Event {
            id: self.id.unwrap_or(EventId::Draft),
            title: self.title,
            description: self.description,
            location: self.location,
            start,
            end,
            all_day: self.all_day,
            category_id: self.category_id,
        };

        event.validate()?;
        Ok(event)
    }
}
