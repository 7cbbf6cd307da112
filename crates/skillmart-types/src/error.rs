use thiserror::Error;

use crate::booking::BookingStatus;

/// Errors from booking operations.
///
/// Every variant is raised before any state is written; a failed operation
/// leaves the booking exactly as it was.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("illegal transition from '{from}' to '{to}'")]
    IllegalTransition { from: BookingStatus, to: BookingStatus },

    #[error("revision limit exceeded: {used} of {max} revisions already used")]
    RevisionLimitExceeded { used: u32, max: u32 },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for BookingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => BookingError::Conflict(msg),
            RepositoryError::NotFound => BookingError::NotFound("booking".to_string()),
            other => BookingError::Storage(other.to_string()),
        }
    }
}

/// Errors from seller profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("seller profile '{0}' not found")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ProfileError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => ProfileError::Conflict(msg),
            other => ProfileError::Storage(other.to_string()),
        }
    }
}

/// Errors from repository operations (used by trait definitions in skillmart-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
