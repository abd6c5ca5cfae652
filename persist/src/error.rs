//! Errors surfaced by the toggle service.

use thiserror::Error;

use crate::io::config::LocationError;
use crate::io::store::StorageError;

/// Failure of a single toggle call.
///
/// Read problems never appear here: the store treats them as an empty set.
#[derive(Debug, Error)]
pub enum ToggleError {
    /// The caller supplied no path. Nothing was read or written.
    #[error("invalid input: lab path is empty")]
    InvalidInput,
    /// The storage location could not be resolved.
    #[error(transparent)]
    Location(#[from] LocationError),
    /// Writing the updated set failed; the previous file is left as it was.
    #[error("failed to update persist list")]
    Storage(#[from] StorageError),
}

impl ToggleError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput)
    }
}
