use lazycal_core::error::CoreError;
use lazycal_service::error::ServiceError;
use lazycal_store::error::StoreError;
use salvo::{Response, http::StatusCode, writing::Json};
use serde::Serialize;

use crate::error::AppError;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn render_error(res: &mut Response, status: StatusCode, error: impl Into<String>) {
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: error.into(),
    }));
}

/// Maps a failure to the status a client should see and renders it.
///
/// Validation problems are the client's fault; a missing record is a 404;
/// everything else is logged and reported as a 500 without internals.
pub fn render_app_error(res: &mut Response, err: &AppError) {
    match err {
        AppError::StoreError(StoreError::NotFound(id))
        | AppError::ServiceError(ServiceError::StoreError(StoreError::NotFound(id))) => {
            render_error(res, StatusCode::NOT_FOUND, format!("Event {id} not found"));
        }
        AppError::CoreError(core @ CoreError::ValidationError(_))
        | AppError::StoreError(StoreError::CoreError(core @ CoreError::ValidationError(_))) => {
            render_error(res, StatusCode::BAD_REQUEST, core.to_string());
        }
        AppError::ServiceError(ServiceError::InvalidWindow(window)) => {
            render_error(
                res,
                StatusCode::BAD_REQUEST,
                format!("Invalid date window: {window}"),
            );
        }
        AppError::StoreError(_) | AppError::ServiceError(_) | AppError::CoreError(_) => {
            tracing::error!(error = %err, "Request failed");
            render_error(res, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    }
}
