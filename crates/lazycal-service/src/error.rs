use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    StoreError(#[from] lazycal_store::error::StoreError),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
