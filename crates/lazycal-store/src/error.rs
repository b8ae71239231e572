use thiserror::Error;
use uuid::Uuid;

/// Storage layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// No event with this id exists. Distinct from transport failures so
    /// callers can tell "nothing to do" from "something is broken".
    #[error("Event not found: {0}")]
    NotFound(Uuid),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Remote store error: {0}")]
    RemoteError(#[from] reqwest::Error),

    #[error("Invalid remote URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    CoreError(#[from] lazycal_core::error::CoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
