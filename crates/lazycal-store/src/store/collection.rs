//! Mutations shared by the stores that hold the whole collection locally.

use chrono::Utc;
use lazycal_core::model::{Event, EventPatch, NewEvent};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

pub(super) fn create(events: &mut Vec<Event>, new_event: NewEvent) -> StoreResult<Event> {
    new_event.validate()?;
    let event = new_event.into_event(Utc::now());
    events.push(event.clone());
    Ok(event)
}

/// Patches a copy first so a validation failure leaves the stored event intact.
pub(super) fn update(events: &mut [Event], id: Uuid, patch: EventPatch) -> StoreResult<Event> {
    let slot = events
        .iter_mut()
        .find(|event| event.id == id)
        .ok_or(StoreError::NotFound(id))?;

    let mut updated = slot.clone();
    patch.apply(&mut updated, Utc::now());
    updated.validate()?;

    *slot = updated.clone();
    Ok(updated)
}

pub(super) fn delete(events: &mut Vec<Event>, id: Uuid) -> bool {
    let before = events.len();
    events.retain(|event| event.id != id);
    events.len() != before
}
