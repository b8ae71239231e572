//! Stored event definitions.
//!
//! An [`Event`] is either anchored to an exact calendar date or to a relative
//! "Nth weekday of the month" pattern, and may carry a [`RecurrenceRule`].
//! Field names serialize in camelCase and dates as ISO-8601 strings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Day of the week, as stored on `timeOfMonth` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Zero-based index with Sunday as day 0.
    #[must_use]
    pub const fn num_days_from_sunday(self) -> u32 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// Which occurrence of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekPosition {
    First,
    Second,
    Third,
    Fourth,
}

impl WeekPosition {
    /// One-based ordinal of the position.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Yearly,
}

/// Descriptive place information; carries no invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// When an event (or the first cycle of a recurring one) happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum EventDate {
    /// A fixed calendar date, optionally spanning several days.
    ///
    /// `start` is optional on the wire so records written by older clients
    /// still decode; such events never produce occurrences.
    #[serde(rename_all = "camelCase")]
    Exact {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<NaiveDate>,
    },
    /// "The Nth of any of these weekdays" in a month.
    #[serde(rename_all = "camelCase")]
    TimeOfMonth {
        week_position: WeekPosition,
        #[serde(default)]
        weekdays: Vec<Weekday>,
    },
}

impl EventDate {
    /// Single-day exact date.
    #[must_use]
    pub const fn on(start: NaiveDate) -> Self {
        Self::Exact {
            start: Some(start),
            end: None,
        }
    }

    /// Multi-day exact date.
    #[must_use]
    pub const fn spanning(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Exact {
            start: Some(start),
            end: Some(end),
        }
    }

    #[must_use]
    pub fn time_of_month(week_position: WeekPosition, weekdays: Vec<Weekday>) -> Self {
        Self::TimeOfMonth {
            week_position,
            weekdays,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// 1-12. Pins the month of a yearly `timeOfMonth` event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Maximum number of occurrences, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Last permissible occurrence date, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
}

impl RecurrenceRule {
    #[must_use]
    pub const fn monthly() -> Self {
        Self {
            frequency: Frequency::Monthly,
            month: None,
            count: None,
            until: None,
        }
    }

    #[must_use]
    pub const fn yearly() -> Self {
        Self {
            frequency: Frequency::Yearly,
            month: None,
            count: None,
            until: None,
        }
    }

    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub const fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub const fn in_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<EventLocation>,
    pub date: EventDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// ## Summary
    /// Checks the invariants a stored event must satisfy.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` describing the first violated rule.
    pub fn validate(&self) -> CoreResult<()> {
        validate_fields(&self.title, &self.date, self.recurrence.as_ref())
    }
}

/// Event contents before the store assigns identity and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<EventLocation>,
    pub date: EventDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
}

impl NewEvent {
    #[must_use]
    pub fn new(title: impl Into<String>, date: EventDate) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: None,
            location: None,
            date,
            recurrence: None,
        }
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: RecurrenceRule) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: EventLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// ## Summary
    /// Checks the same invariants as [`Event::validate`].
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` describing the first violated rule.
    pub fn validate(&self) -> CoreResult<()> {
        validate_fields(&self.title, &self.date, self.recurrence.as_ref())
    }

    /// Materializes the event with a fresh time-ordered id and both
    /// timestamps set to `now`.
    #[must_use]
    pub fn into_event(self, now: DateTime<Utc>) -> Event {
        Event {
            id: Uuid::now_v7(),
            title: self.title,
            description: self.description,
            url: self.url,
            location: self.location,
            date: self.date,
            recurrence: self.recurrence,
            created_at: now,
            updated_at: now,
        }
    }
}

fn validate_fields(
    title: &str,
    date: &EventDate,
    recurrence: Option<&RecurrenceRule>,
) -> CoreResult<()> {
    if title.trim().is_empty() {
        return Err(CoreError::ValidationError("title must not be empty".into()));
    }

    match date {
        EventDate::Exact { start: None, .. } => {
            return Err(CoreError::ValidationError(
                "exact dates require a start".into(),
            ));
        }
        EventDate::TimeOfMonth { weekdays, .. } if weekdays.is_empty() => {
            return Err(CoreError::ValidationError(
                "timeOfMonth dates require at least one weekday".into(),
            ));
        }
        EventDate::Exact { .. } | EventDate::TimeOfMonth { .. } => {}
    }

    let Some(rule) = recurrence else {
        return Ok(());
    };

    if let Some(month) = rule.month.filter(|month| !(1..=12).contains(month)) {
        return Err(CoreError::ValidationError(format!(
            "recurrence month {month} is outside 1-12"
        )));
    }

    Ok(())
}
