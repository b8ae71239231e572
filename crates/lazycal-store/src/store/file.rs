//! Local persistent store: one JSON array of events on disk.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lazycal_core::model::{Event, EventPatch, NewEvent};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{EventStore, collection};
use crate::error::StoreResult;

/// Keeps the whole collection in a single JSON document.
///
/// A missing file is an empty collection. Writes land in a sibling temp file
/// that is then renamed over the document, so readers never observe a
/// partially written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<Vec<Event>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Event file missing, starting empty");
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, events: &[Event]) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(events)?;

        if let Some(parent) = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut temp = OsString::from(self.path.as_os_str());
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        tokio::fs::write(&temp, bytes).await?;
        if let Err(err) = tokio::fs::rename(&temp, &self.path).await {
            tokio::fs::remove_file(&temp).await.ok();
            return Err(err.into());
        }

        tracing::trace!(path = %self.path.display(), count = events.len(), "Event file written");
        Ok(())
    }
}

#[async_trait]
impl EventStore for FileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn get_events(&self) -> StoreResult<Vec<Event>> {
        self.load().await
    }

    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        Ok(self.load().await?.into_iter().find(|event| event.id == id))
    }

    #[tracing::instrument(skip(self, new_event), fields(path = %self.path.display()))]
    async fn create_event(&self, new_event: NewEvent) -> StoreResult<Event> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.load().await?;
        let event = collection::create(&mut events, new_event)?;
        self.save(&events).await?;
        tracing::debug!(event_id = %event.id, "Created event");
        Ok(event)
    }

    #[tracing::instrument(skip(self, patch), fields(path = %self.path.display()))]
    async fn update_event(&self, id: Uuid, patch: EventPatch) -> StoreResult<Event> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.load().await?;
        let event = collection::update(&mut events, id, patch)?;
        self.save(&events).await?;
        Ok(event)
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn delete_event(&self, id: Uuid) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.load().await?;
        if !collection::delete(&mut events, id) {
            return Ok(false);
        }
        self.save(&events).await?;
        Ok(true)
    }
}
