//! Error types for the fileguard integrity monitor.

use crate::types::HashAlgorithm;
use std::path::PathBuf;
use thiserror::Error;

/// Per-file hashing errors. Always recovered during enumeration.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("File unreadable: {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            HashError::NotFound(path.to_path_buf())
        } else {
            HashError::Unreadable {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Snapshot and baseline storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Cannot walk directory {path}: {reason}")]
    RootInaccessible { path: PathBuf, reason: String },

    #[error("No baseline found at {0}. Run `fileguard create <DIRECTORY>` first.")]
    BaselineMissing(PathBuf),

    #[error("Baseline at {path} is corrupt: {reason}")]
    BaselineCorrupt { path: PathBuf, reason: String },

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error(
        "Baseline at {path} was hashed with {baseline}, but the configured algorithm is {configured}. \
         Recreate the baseline or set hashing.algorithm = \"{baseline}\"."
    )]
    AlgorithmMismatch {
        path: PathBuf,
        baseline: HashAlgorithm,
        configured: HashAlgorithm,
    },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level errors surfaced to callers of the monitor and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid mode: '{0}' (expected 'create' or 'check')")]
    InvalidMode(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    StorageError(#[from] StorageError),
}

impl ApiError {
    /// Process exit status for this error.
    ///
    /// 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::StorageError(StorageError::BaselineMissing(_)) => 3,
            ApiError::StorageError(StorageError::BaselineCorrupt { .. }) => 4,
            ApiError::StorageError(StorageError::RootInaccessible { .. }) => 5,
            ApiError::InvalidMode(_) => 6,
            ApiError::StorageError(StorageError::AlgorithmMismatch { .. }) => 7,
            _ => 1,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
