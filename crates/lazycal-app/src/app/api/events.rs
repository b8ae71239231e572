use lazycal_core::model::{EventPatch, NewEvent};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use uuid::Uuid;

use super::EVENTS_ROUTE_COMPONENT;
use super::response::{render_app_error, render_error};
use crate::store_handler::{SharedStore, get_store_from_depot};

fn store_or_500(depot: &Depot, res: &mut Response) -> Option<SharedStore> {
    match get_store_from_depot(depot) {
        Ok(store) => Some(store),
        Err(err) => {
            render_app_error(res, &err);
            None
        }
    }
}

fn event_id_or_400(req: &Request, res: &mut Response) -> Option<Uuid> {
    let raw = req.param::<String>("id").unwrap_or_default();
    match Uuid::parse_str(&raw) {
        Ok(id) => Some(id),
        Err(_) => {
            render_error(res, StatusCode::BAD_REQUEST, format!("Invalid event id: {raw}"));
            None
        }
    }
}

/// ## Summary
/// GET /api/events - every stored event, in insertion order
#[handler]
async fn list_events(depot: &mut Depot, res: &mut Response) {
    let Some(store) = store_or_500(depot, res) else {
        return;
    };
    match store.get_events().await {
        Ok(events) => res.render(Json(events)),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// ## Summary
/// POST /api/events - create an event
///
/// ## Side Effects
/// Persists the event; the store assigns its id and timestamps.
///
/// ## Errors
/// Returns HTTP 400 for a malformed body or an event that fails validation.
/// Returns HTTP 500 if the store cannot be written.
#[handler]
async fn create_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let new_event: NewEvent = match req.parse_json().await {
        Ok(new_event) => new_event,
        Err(err) => {
            tracing::debug!(error = ?err, "Failed to parse event body");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            return;
        }
    };
    let Some(store) = store_or_500(depot, res) else {
        return;
    };

    match store.create_event(new_event).await {
        Ok(event) => {
            tracing::info!(event_id = %event.id, "Event created");
            res.status_code(StatusCode::CREATED);
            res.render(Json(event));
        }
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// ## Summary
/// GET /api/events/{id}
#[handler]
async fn get_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = event_id_or_400(req, res) else {
        return;
    };
    let Some(store) = store_or_500(depot, res) else {
        return;
    };

    match store.get_event(id).await {
        Ok(Some(event)) => res.render(Json(event)),
        Ok(None) => render_error(res, StatusCode::NOT_FOUND, format!("Event {id} not found")),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// ## Summary
/// PATCH /api/events/{id} - partial update; `null` clears optional fields
///
/// ## Errors
/// Returns HTTP 404 for an unknown id and HTTP 400 when the patched event
/// fails validation.
#[handler]
async fn update_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = event_id_or_400(req, res) else {
        return;
    };
    let patch: EventPatch = match req.parse_json().await {
        Ok(patch) => patch,
        Err(err) => {
            tracing::debug!(error = ?err, "Failed to parse event patch");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            return;
        }
    };
    let Some(store) = store_or_500(depot, res) else {
        return;
    };

    match store.update_event(id, patch).await {
        Ok(event) => res.render(Json(event)),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// ## Summary
/// DELETE /api/events/{id}
#[handler]
async fn delete_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = event_id_or_400(req, res) else {
        return;
    };
    let Some(store) = store_or_500(depot, res) else {
        return;
    };

    match store.delete_event(id).await {
        Ok(true) => {
            tracing::info!(event_id = %id, "Event deleted");
            res.status_code(StatusCode::NO_CONTENT);
        }
        Ok(false) => render_error(res, StatusCode::NOT_FOUND, format!("Event {id} not found")),
        Err(err) => render_app_error(res, &err.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_ROUTE_COMPONENT)
        .get(list_events)
        .post(create_event)
        .push(
            Router::with_path("{id}")
                .get(get_event)
                .patch(update_event)
                .delete(delete_event),
        )
}
