//! Expansion of events anchored to an exact calendar date.

use std::sync::Arc;

use chrono::NaiveDate;
use lazycal_core::model::{Event, EventInstance, Frequency, RecurrenceRule};

use super::calendar::add_months_clamped;
use super::{MAX_ITERATIONS, Window};

pub(super) fn expand(
    event: &Arc<Event>,
    start: NaiveDate,
    end: Option<NaiveDate>,
    window: Window,
) -> Vec<EventInstance> {
    let Some(rule) = event.recurrence.as_ref() else {
        if window.contains(start) {
            return vec![EventInstance::new(event, start, end)];
        }
        return Vec::new();
    };

    expand_recurring(event, start, end, rule, window)
}

/// Walks anchor positions from the event's true start. Every position counts
/// toward `count`, including the ones before the window.
fn expand_recurring(
    event: &Arc<Event>,
    start: NaiveDate,
    end: Option<NaiveDate>,
    rule: &RecurrenceRule,
    window: Window,
) -> Vec<EventInstance> {
    let span = end.map(|end| end.signed_duration_since(start));
    let mut instances = Vec::new();
    let mut generated: u32 = 0;

    for step in 0..MAX_ITERATIONS {
        let Some(anchor) = anchor_at(start, rule.frequency, step) else {
            break;
        };
        if anchor > window.end
            || rule.count.is_some_and(|count| generated >= count)
            || rule.until.is_some_and(|until| anchor > until)
        {
            return instances;
        }

        generated += 1;
        if anchor >= window.start {
            let instance_end = span.and_then(|span| anchor.checked_add_signed(span));
            instances.push(EventInstance::new(event, anchor, instance_end));
        }
    }

    tracing::trace!(
        event_id = %event.id,
        generated,
        "Recurrence iteration ceiling reached"
    );
    instances
}

/// Anchor of the `step`-th occurrence, always derived from the original start
/// so a clamped month (Jan 31 -> Feb 29) does not shorten later ones.
fn anchor_at(start: NaiveDate, frequency: Frequency, step: u32) -> Option<NaiveDate> {
    let months = match frequency {
        Frequency::Monthly => step,
        Frequency::Yearly => step.checked_mul(12)?,
    };
    add_months_clamped(start, months)
}
