//! Configuration System
//!
//! Layered configuration for the monitor: built-in defaults, a user-level
//! file, a per-directory `fileguard.toml`, then `FILEGUARD__*` environment
//! variables. CLI flags are applied on top by the caller.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::hasher::CHUNK_SIZE;
use crate::types::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Default baseline file name, resolved against the working directory
pub const DEFAULT_BASELINE_FILE: &str = "baseline.json";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileguardConfig {
    #[serde(default)]
    pub baseline: BaselineConfig,

    #[serde(default)]
    pub hashing: HashingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the baseline lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineConfig {
    #[serde(default = "default_baseline_path")]
    pub path: PathBuf,
}

fn default_baseline_path() -> PathBuf {
    PathBuf::from(DEFAULT_BASELINE_FILE)
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            path: default_baseline_path(),
        }
    }
}

/// Digest settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashingConfig {
    #[serde(default)]
    pub algorithm: HashAlgorithm,

    /// Read size in bytes when streaming a file into the hasher
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    CHUNK_SIZE
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            chunk_size: default_chunk_size(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Baseline(String),
    Hashing(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Baseline(msg) => write!(f, "Baseline: {}", msg),
            ValidationError::Hashing(msg) => write!(f, "Hashing: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FileguardConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.baseline.path.as_os_str().is_empty() {
            errors.push(ValidationError::Baseline(
                "Baseline path cannot be empty".to_string(),
            ));
        }

        if self.hashing.chunk_size == 0 {
            errors.push(ValidationError::Hashing(
                "Chunk size must be at least 1 byte".to_string(),
            ));
        }

        if let Err(messages) = self.logging.validate() {
            errors.extend(messages.into_iter().map(ValidationError::Logging));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all problems into one `ApiError::ConfigError`
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })
    }
}
