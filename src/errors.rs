use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced across the service boundary.
///
/// Store-layer failures propagate unmodified; no retry or translation
/// happens here. Absence of a document on read is never an error, it is
/// an existence-check outcome handled inside each operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Event error: {0}")]
    EventError(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => ServiceError::StoreUnavailable(msg),
            StoreError::Serialization(msg) => ServiceError::Serialization(msg),
        }
    }
}
