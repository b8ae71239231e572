//! The storage collaborator contract and its variants.
//!
//! Callers pick a variant explicitly, either by constructing it directly or
//! through [`Store::open`]; nothing here holds a process-wide "current" store.

mod collection;
pub mod file;
pub mod memory;
pub mod remote;

use async_trait::async_trait;
use lazycal_core::config::{StorageBackend, StorageConfig};
use lazycal_core::model::{Event, EventPatch, NewEvent};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;

/// Persistent collection of event definitions.
///
/// Implementations assign `id`/`created_at`/`updated_at` on create and
/// refresh `updated_at` on every update. `get_events` returns events in
/// insertion order.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Every stored event. A failure means no partial result.
    async fn get_events(&self) -> StoreResult<Vec<Event>>;

    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>>;

    /// ## Errors
    /// `StoreError::CoreError` when the event fails validation.
    async fn create_event(&self, new_event: NewEvent) -> StoreResult<Event>;

    /// ## Errors
    /// `StoreError::NotFound` when `id` is unknown, `StoreError::CoreError`
    /// when the patched event fails validation.
    async fn update_event(&self, id: Uuid, patch: EventPatch) -> StoreResult<Event>;

    /// Returns `true` if a record was removed.
    async fn delete_event(&self, id: Uuid) -> StoreResult<bool>;
}

/// Store variant selected from configuration.
#[derive(Debug)]
pub enum Store {
    Memory(MemoryStore),
    Local(FileStore),
    Remote(RemoteStore),
}

impl Store {
    /// ## Summary
    /// Builds the store variant named by `config.backend`.
    ///
    /// ## Errors
    /// Returns an error if the configuration is incomplete for the chosen
    /// backend or the remote URL cannot be parsed.
    #[tracing::instrument(skip(config), fields(backend = ?config.backend))]
    pub fn open(config: &StorageConfig) -> StoreResult<Self> {
        config.validate()?;

        let store = match config.backend {
            StorageBackend::Memory => Self::Memory(MemoryStore::new()),
            StorageBackend::Local => Self::Local(FileStore::new(&config.path)),
            StorageBackend::Remote => {
                let url = config.url.as_deref().ok_or_else(|| {
                    StoreError::InvalidUrl("storage.url is not set".to_string())
                })?;
                Self::Remote(RemoteStore::new(url)?)
            }
        };

        tracing::info!("Event store opened");
        Ok(store)
    }

    fn inner(&self) -> &dyn EventStore {
        match self {
            Self::Memory(store) => store,
            Self::Local(store) => store,
            Self::Remote(store) => store,
        }
    }
}

#[async_trait]
impl EventStore for Store {
    async fn get_events(&self) -> StoreResult<Vec<Event>> {
        self.inner().get_events().await
    }

    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        self.inner().get_event(id).await
    }

    async fn create_event(&self, new_event: NewEvent) -> StoreResult<Event> {
        self.inner().create_event(new_event).await
    }

    async fn update_event(&self, id: Uuid, patch: EventPatch) -> StoreResult<Event> {
        self.inner().update_event(id, patch).await
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<bool> {
        self.inner().delete_event(id).await
    }
}
