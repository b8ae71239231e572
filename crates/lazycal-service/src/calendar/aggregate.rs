//! Merges the occurrences of every stored event into one sorted sequence.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use lazycal_core::model::EventInstance;
use lazycal_recur::generate_instances;
use lazycal_store::store::EventStore;

use super::window::month_window;
use crate::error::{ServiceError, ServiceResult};

/// Computes event instances for a date window from an injected store.
///
/// Holds no mutable state; concurrent queries only read from the store.
pub struct InstanceAggregator<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for InstanceAggregator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: EventStore + ?Sized> InstanceAggregator<S> {
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// ## Summary
    /// All instances of all stored events within `[window_start, window_end]`,
    /// ascending by date. Instances sharing a date keep the store's event order.
    ///
    /// ## Errors
    /// Returns `ServiceError::StoreError` if the event collection cannot be
    /// read. No partial list is returned in that case.
    #[tracing::instrument(skip(self))]
    pub async fn get_instances(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> ServiceResult<Vec<EventInstance>> {
        let events = self.store.get_events().await?;
        let event_count = events.len();

        let mut instances: Vec<EventInstance> = events
            .into_iter()
            .map(Arc::new)
            .flat_map(|event| generate_instances(&event, window_start, window_end))
            .collect();
        instances.sort_by_key(|instance| instance.instance_date);

        tracing::debug!(
            event_count,
            instance_count = instances.len(),
            "Instances generated"
        );
        Ok(instances)
    }

    /// ## Summary
    /// Same sequence as [`Self::get_instances`], grouped by instance date.
    ///
    /// ## Errors
    /// Returns `ServiceError::StoreError` if the event collection cannot be read.
    pub async fn get_instances_by_day(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> ServiceResult<BTreeMap<NaiveDate, Vec<EventInstance>>> {
        let mut days: BTreeMap<NaiveDate, Vec<EventInstance>> = BTreeMap::new();
        for instance in self.get_instances(window_start, window_end).await? {
            days.entry(instance.instance_date).or_default().push(instance);
        }
        Ok(days)
    }

    /// ## Summary
    /// Instances for one calendar month.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidWindow` for a month outside 1-12 and
    /// `ServiceError::StoreError` if the event collection cannot be read.
    pub async fn get_month_instances(
        &self,
        year: i32,
        month: u32,
    ) -> ServiceResult<Vec<EventInstance>> {
        let (start, end) = month_window(year, month)
            .ok_or_else(|| ServiceError::InvalidWindow(format!("{year}-{month}")))?;
        self.get_instances(start, end).await
    }
}
