//! Brevet store error types.

use crate::domain::BrevetId;

/// Errors that can occur when reading or changing stored brevets.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No brevet with this id
    #[error("brevet {0} not found")]
    NotFound(BrevetId),

    /// Snapshot file could not be read or written
    #[error("snapshot error: {message}")]
    Snapshot { message: String },
}
