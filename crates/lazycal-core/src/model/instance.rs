use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use super::event::Event;

/// One concrete occurrence of an event. Recomputed on every query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInstance {
    /// Source definition, shared by every instance of the same event.
    pub event: Arc<Event>,
    pub instance_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_end: Option<NaiveDate>,
}

impl EventInstance {
    #[must_use]
    pub fn new(event: &Arc<Event>, instance_date: NaiveDate, instance_end: Option<NaiveDate>) -> Self {
        Self {
            event: Arc::clone(event),
            instance_date,
            instance_end,
        }
    }
}
