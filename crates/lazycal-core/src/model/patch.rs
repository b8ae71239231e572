//! Partial updates to stored events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::event::{Event, EventDate, EventLocation, RecurrenceRule};

/// Fields to change on an existing event.
///
/// A missing field leaves the stored value untouched. For optional fields an
/// explicit `null` clears the stored value (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Option<EventLocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<EventDate>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurrence: Option<Option<RecurrenceRule>>,
}

impl EventPatch {
    /// Applies the patch in place. `id` and `created_at` are never touched;
    /// `updated_at` is always refreshed to `now`.
    pub fn apply(self, event: &mut Event, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(url) = self.url {
            event.url = url;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(recurrence) = self.recurrence {
            event.recurrence = recurrence;
        }
        event.updated_at = now;
    }
}

/// Distinguishes a present `null` from an absent field.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
