//! Remote-sync store: another lazycal server's event API over HTTP.

use async_trait::async_trait;
use lazycal_core::constants::EVENTS_ROUTE_PREFIX;
use lazycal_core::error::CoreError;
use lazycal_core::model::{Event, EventPatch, NewEvent};
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use uuid::Uuid;

use super::EventStore;
use crate::error::{StoreError, StoreResult};

/// Body of a non-2xx reply from a lazycal server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    events_url: Url,
}

impl RemoteStore {
    /// ## Summary
    /// Creates a store talking to the server at `origin`, e.g.
    /// `http://cal.local:8698` or `https://host/lazycal` when the server is
    /// mounted under a path.
    ///
    /// ## Errors
    /// Returns `StoreError::InvalidUrl` if `origin` is not an absolute URL.
    pub fn new(origin: &str) -> StoreResult<Self> {
        let invalid =
            |err: &dyn std::fmt::Display| StoreError::InvalidUrl(format!("{origin}: {err}"));

        let mut base = Url::parse(origin).map_err(|err| invalid(&err))?;
        if base.cannot_be_a_base() {
            return Err(invalid(&"not a base URL"));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let events_url = base
            .join(EVENTS_ROUTE_PREFIX.trim_start_matches('/'))
            .map_err(|err| invalid(&err))?;

        Ok(Self {
            client: Client::new(),
            events_url,
        })
    }

    fn event_url(&self, id: Uuid) -> StoreResult<Url> {
        let mut url = self.events_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidUrl(self.events_url.to_string()))?
            .push(&id.to_string());
        Ok(url)
    }

    /// Decodes the event a create or update answered with.
    ///
    /// ## Errors
    /// A 400 from the remote is its validation verdict and comes back as
    /// `CoreError::ValidationError`; other failures are `RemoteError`.
    async fn event_from(response: Response) -> StoreResult<Event> {
        if response.status() == StatusCode::BAD_REQUEST {
            let body = response.json::<ErrorBody>().await?;
            let message = body
                .error
                .strip_prefix("Validation error: ")
                .map_or_else(|| body.error.clone(), str::to_string);
            return Err(CoreError::ValidationError(message).into());
        }
        Ok(response.error_for_status()?.json::<Event>().await?)
    }
}

#[async_trait]
impl EventStore for RemoteStore {
    #[tracing::instrument(skip(self), fields(url = %self.events_url))]
    async fn get_events(&self) -> StoreResult<Vec<Event>> {
        let events = self
            .client
            .get(self.events_url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Event>>()
            .await?;
        tracing::debug!(count = events.len(), "Fetched remote events");
        Ok(events)
    }

    #[tracing::instrument(skip(self))]
    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        let response = self.client.get(self.event_url(id)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json::<Event>().await?))
    }

    #[tracing::instrument(skip(self, new_event), fields(title = %new_event.title))]
    async fn create_event(&self, new_event: NewEvent) -> StoreResult<Event> {
        new_event.validate()?;
        let response = self
            .client
            .post(self.events_url.clone())
            .json(&new_event)
            .send()
            .await?;
        Self::event_from(response).await
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update_event(&self, id: Uuid, patch: EventPatch) -> StoreResult<Event> {
        let response = self
            .client
            .patch(self.event_url(id)?)
            .json(&patch)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id));
        }
        Self::event_from(response).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_event(&self, id: Uuid) -> StoreResult<bool> {
        let response = self.client.delete(self.event_url(id)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        response.error_for_status()?;
        Ok(true)
    }
}
