//! Expansion of events expressed as "the Nth weekday of the month".

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use lazycal_core::model::{Event, EventInstance, Frequency, RecurrenceRule, WeekPosition, Weekday};

use super::calendar::{add_months_clamped, first_of_month, next_month, nth_weekday_of_month};
use super::{MAX_ITERATIONS, Window};

pub(super) fn expand(
    event: &Arc<Event>,
    position: WeekPosition,
    weekdays: &[Weekday],
    window: Window,
) -> Vec<EventInstance> {
    match event.recurrence.as_ref() {
        None => earliest_match(event, position, weekdays, window)
            .into_iter()
            .collect(),
        Some(rule) => expand_recurring(event, position, weekdays, rule, window),
    }
}

/// Every date in the month starting at `month` that matches the pattern,
/// ascending and without duplicates. Weekdays with no such occurrence in
/// this month are skipped.
fn candidates_in_month(month: NaiveDate, position: WeekPosition, weekdays: &[Weekday]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = weekdays
        .iter()
        .filter_map(|weekday| {
            nth_weekday_of_month(month.year(), month.month(), *weekday, position.ordinal())
        })
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Non-recurring case: the first matching date on or after the window start,
/// scanning month by month until the window ends.
fn earliest_match(
    event: &Arc<Event>,
    position: WeekPosition,
    weekdays: &[Weekday],
    window: Window,
) -> Option<EventInstance> {
    let mut month = first_of_month(window.start);

    for _ in 0..MAX_ITERATIONS {
        if month > window.end {
            return None;
        }

        if let Some(date) = candidates_in_month(month, position, weekdays)
            .into_iter()
            .find(|date| *date >= window.start)
        {
            return (date <= window.end).then(|| EventInstance::new(event, date, None));
        }

        month = next_month(month)?;
    }

    None
}

/// Recurring case. Months are visited from the one containing the window
/// start; `count` consumes emitted instances only.
fn expand_recurring(
    event: &Arc<Event>,
    position: WeekPosition,
    weekdays: &[Weekday],
    rule: &RecurrenceRule,
    window: Window,
) -> Vec<EventInstance> {
    let pinned = match rule.frequency {
        Frequency::Yearly => rule.month,
        Frequency::Monthly => None,
    };
    let mut instances = Vec::new();
    let mut emitted: u32 = 0;
    let mut month = first_of_month(window.start);

    for _ in 0..MAX_ITERATIONS {
        if month > window.end || rule.until.is_some_and(|until| month > until) {
            return instances;
        }

        if let Some(pinned) = pinned.filter(|pinned| *pinned != month.month()) {
            let Some(target) = next_pinned_month(month, pinned) else {
                return instances;
            };
            month = target;
            continue;
        }

        for date in candidates_in_month(month, position, weekdays) {
            if date < window.start {
                continue;
            }
            if date > window.end
                || rule.until.is_some_and(|until| date > until)
                || rule.count.is_some_and(|count| emitted >= count)
            {
                return instances;
            }
            emitted += 1;
            instances.push(EventInstance::new(event, date, None));
        }

        let next = match rule.frequency {
            Frequency::Monthly => next_month(month),
            Frequency::Yearly => add_months_clamped(month, 12),
        };
        let Some(next) = next else {
            return instances;
        };
        month = next;
    }

    tracing::trace!(
        event_id = %event.id,
        emitted,
        "Recurrence iteration ceiling reached"
    );
    instances
}

/// The next first-of-month whose month number is `pinned`: later this year
/// if still ahead, otherwise the following year.
fn next_pinned_month(month: NaiveDate, pinned: u32) -> Option<NaiveDate> {
    let year = if month.month() < pinned {
        month.year()
    } else {
        month.year().checked_add(1)?
    };
    NaiveDate::from_ymd_opt(year, pinned, 1)
}
