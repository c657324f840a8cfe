//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, StorageError};

/// Map domain errors to the message printed on stderr.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::StorageError(StorageError::BaselineMissing(path)) => format!(
            "Error: no baseline at {}. Run 'fileguard create <DIRECTORY>' first.",
            path.display()
        ),
        _ => format!("Error: {}", e),
    }
}
