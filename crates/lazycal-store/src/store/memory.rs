use async_trait::async_trait;
use lazycal_core::model::{Event, EventPatch, NewEvent};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EventStore, collection};
use crate::error::StoreResult;

/// In-memory store for tests and throwaway instances.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<Vec<Event>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with already materialized events.
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn get_events(&self) -> StoreResult<Vec<Event>> {
        Ok(self.events.read().await.clone())
    }

    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .find(|event| event.id == id)
            .cloned())
    }

    #[tracing::instrument(skip(self, new_event), fields(title = %new_event.title))]
    async fn create_event(&self, new_event: NewEvent) -> StoreResult<Event> {
        let event = collection::create(&mut *self.events.write().await, new_event)?;
        tracing::debug!(event_id = %event.id, "Created event");
        Ok(event)
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update_event(&self, id: Uuid, patch: EventPatch) -> StoreResult<Event> {
        collection::update(&mut self.events.write().await, id, patch)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_event(&self, id: Uuid) -> StoreResult<bool> {
        Ok(collection::delete(&mut *self.events.write().await, id))
    }
}
