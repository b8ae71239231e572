mod app_specific;
mod events;
mod instances;
mod response;

use salvo::Router;

pub use lazycal_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, EVENTS_ROUTE_COMPONENT, EVENTS_ROUTE_PREFIX,
    INSTANCES_ROUTE_COMPONENT, INSTANCES_ROUTE_PREFIX,
};
pub use response::ErrorResponse;

/// ## Summary
/// Constructs the API router: health check, event CRUD and the instance query.
///
/// Expects a [`crate::store_handler::StoreHandler`] hoop further up the tree.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(events::routes())
        .push(instances::routes())
}
