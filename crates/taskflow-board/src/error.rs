//! Error types for board operations.

use taskflow_models::ValidationError;
use taskflow_persistence::PersistenceError;
use thiserror::Error;

/// Errors that can occur during board mutations.
///
/// Unknown ids are not errors: update/delete/move on a missing entity is a
/// no-op reported as `Ok(false)`.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Draft or patch failed validation; the store was not changed.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Persisting the new snapshot failed; the previous snapshot is kept.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;
