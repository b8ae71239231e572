use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] lazycal_service::error::ServiceError),

    #[error(transparent)]
    StoreError(#[from] lazycal_store::error::StoreError),

    #[error(transparent)]
    CoreError(#[from] lazycal_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
