//! Error types for the item service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::MessageResponse;
use crate::storage::StorageError;

// == Api Error Enum ==
/// Unified error type for the HTTP layer.
///
/// The display text of every variant is the exact message sent to clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Malformed write input
    #[error("{0}")]
    Validation(String),

    /// Staleness query, read or write of the backing store failed
    #[error("{0}")]
    StorageUnavailable(String),
}

impl ApiError {
    /// Storage failure reported with the raw underlying message.
    pub fn storage(err: StorageError) -> Self {
        ApiError::StorageUnavailable(err.to_string())
    }

    /// Storage failure reported with a "Failed to ... data" prefix, as the
    /// item routes do.
    pub fn storage_context(err: StorageError) -> Self {
        let message = match &err {
            StorageError::Write(msg) => format!("Failed to write data: {}", msg),
            StorageError::Read(msg) | StorageError::Metadata(msg) => {
                format!("Failed to read data: {}", msg)
            }
        };
        ApiError::StorageUnavailable(message)
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::storage(err)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", self);
        }

        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the item service.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::NotFound("x".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::StorageUnavailable("x".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_keeps_raw_message() {
        let err = ApiError::storage(StorageError::Read("File not found".to_string()));
        assert_eq!(err.to_string(), "File not found");
    }

    #[test]
    fn test_storage_context_prefixes_message() {
        let err = ApiError::storage_context(StorageError::Read("boom".to_string()));
        assert_eq!(err.to_string(), "Failed to read data: boom");

        let err = ApiError::storage_context(StorageError::Write("disk full".to_string()));
        assert_eq!(err.to_string(), "Failed to write data: disk full");
    }
}
