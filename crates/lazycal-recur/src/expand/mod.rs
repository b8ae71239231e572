//! Occurrence generation for stored event definitions.
//!
//! [`generate_instances`] turns one [`Event`] and an inclusive date window into
//! the date-ordered occurrences of that event inside the window. It is a pure
//! function of its inputs and never fails: malformed definitions simply have
//! no occurrences, so one bad record cannot abort a query over many events.

pub mod calendar;
mod exact;
mod time_of_month;

use std::sync::Arc;

use chrono::NaiveDate;
use lazycal_core::model::{Event, EventDate, EventInstance};

pub use calendar::nth_weekday_of_month;

/// Upper bound on recurrence steps per event and query, independent of
/// `count`/`until`. Reaching it just ends generation.
pub const MAX_ITERATIONS: u32 = 1000;

/// Inclusive `[start, end]` query range.
#[derive(Debug, Clone, Copy)]
struct Window {
    start: NaiveDate,
    end: NaiveDate,
}

impl Window {
    fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// ## Summary
/// Expands `event` into its occurrences within `[window_start, window_end]`.
///
/// Both bounds are inclusive. An inverted window yields nothing.
///
/// ## Side Effects
/// None - this is a pure function that performs expansion in memory.
#[must_use]
#[tracing::instrument(level = "trace", skip(event), fields(event_id = %event.id))]
pub fn generate_instances(
    event: &Arc<Event>,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<EventInstance> {
    if window_start > window_end {
        return Vec::new();
    }
    let window = Window {
        start: window_start,
        end: window_end,
    };

    match &event.date {
        EventDate::Exact {
            start: Some(start),
            end,
        } => exact::expand(event, *start, *end, window),
        EventDate::Exact { start: None, .. } => {
            tracing::debug!(event_id = %event.id, "Exact event has no start date, skipping");
            Vec::new()
        }
        EventDate::TimeOfMonth { weekdays, .. } if weekdays.is_empty() => {
            tracing::debug!(event_id = %event.id, "timeOfMonth event has no weekdays, skipping");
            Vec::new()
        }
        EventDate::TimeOfMonth {
            week_position,
            weekdays,
        } => time_of_month::expand(event, *week_position, weekdays, window),
    }
}
