use std::sync::Arc;

use lazycal_core::error::CoreError;
use lazycal_store::store::EventStore;
use salvo::async_trait;

use crate::error::AppResult;

pub type SharedStore = Arc<dyn EventStore>;

/// Injects the configured event store into every request's depot.
pub struct StoreHandler {
    pub store: SharedStore,
}

#[async_trait]
impl salvo::Handler for StoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
    }
}

/// ## Summary
/// Retrieves the event store from the depot.
///
/// ## Errors
/// Returns an error if no store was injected for this request.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<SharedStore> {
    depot
        .obtain::<SharedStore>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Event store not found in depot").into())
}
