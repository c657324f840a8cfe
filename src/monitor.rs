//! Run modes: create a baseline, or check a directory against one.
//!
//! Each call does exactly one enumeration pass. Nothing is printed here;
//! outcomes are values handed to a [`crate::report::Reporter`].

use crate::config::FileguardConfig;
use crate::diff::{self, DiffResult};
use crate::error::{ApiError, StorageError};
use crate::store::{Baseline, BaselineStore, JsonBaselineStore, Snapshot};
use crate::tree::builder::{Enumeration, SnapshotBuilder};
use crate::tree::hasher::CHUNK_SIZE;
use crate::tree::walker::WalkIssue;
use crate::types::HashAlgorithm;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, instrument};

/// Externally selected run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Create,
    Check,
}

impl FromStr for Mode {
    type Err = ApiError;

    /// Accepts the mode names and the numeric menu choices `1` and `2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" | "1" => Ok(Mode::Create),
            "check" | "2" => Ok(Mode::Check),
            _ => Err(ApiError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Create => f.write_str("create"),
            Mode::Check => f.write_str("check"),
        }
    }
}

/// Settings for one monitor instance
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub baseline_path: PathBuf,
    pub algorithm: HashAlgorithm,
    pub chunk_size: usize,
}

impl MonitorConfig {
    pub fn new(baseline_path: impl Into<PathBuf>) -> Self {
        Self {
            baseline_path: baseline_path.into(),
            algorithm: HashAlgorithm::default(),
            chunk_size: CHUNK_SIZE,
        }
    }
}

impl From<&FileguardConfig> for MonitorConfig {
    fn from(config: &FileguardConfig) -> Self {
        Self {
            baseline_path: config.baseline.path.clone(),
            algorithm: config.hashing.algorithm,
            chunk_size: config.hashing.chunk_size,
        }
    }
}

/// Result of `create`
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub root: PathBuf,
    pub baseline_path: PathBuf,
    pub snapshot: Snapshot,
    pub walk_issues: Vec<WalkIssue>,
}

impl CreateOutcome {
    pub fn unreadable(&self) -> Vec<&str> {
        self.snapshot.unreadable()
    }
}

/// Result of `check`
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub root: PathBuf,
    pub baseline_path: PathBuf,
    pub diff: DiffResult,
    /// Files in the live tree that could not be hashed this run
    pub unreadable: Vec<String>,
    pub walk_issues: Vec<WalkIssue>,
}

/// Snapshot-and-diff engine behind both run modes
pub struct Monitor<S = JsonBaselineStore> {
    config: MonitorConfig,
    store: S,
}

impl Monitor<JsonBaselineStore> {
    pub fn new(config: MonitorConfig) -> Self {
        Self::with_store(config, JsonBaselineStore::new())
    }
}

impl<S: BaselineStore> Monitor<S> {
    pub fn with_store(config: MonitorConfig, store: S) -> Self {
        Self { config, store }
    }

    /// Enumerate `root` once and hash every regular file
    pub fn snapshot(&self, root: &Path) -> Result<Enumeration, ApiError> {
        let enumeration = SnapshotBuilder::new(root.to_path_buf())
            .with_algorithm(self.config.algorithm)
            .with_chunk_size(self.config.chunk_size)
            .skip_file(&self.config.baseline_path)
            .build()?;
        Ok(enumeration)
    }

    /// Enumerate and persist a fresh baseline, replacing any previous one
    #[instrument(skip(self), fields(baseline = %self.config.baseline_path.display()))]
    pub fn create(&self, root: &Path) -> Result<CreateOutcome, ApiError> {
        let enumeration = self.snapshot(root)?;
        let baseline = Baseline::new(self.config.algorithm, enumeration.snapshot);
        self.store.persist(&baseline, &self.config.baseline_path)?;

        info!(entries = baseline.snapshot.len(), "Baseline created");
        Ok(CreateOutcome {
            root: enumeration.root,
            baseline_path: self.config.baseline_path.clone(),
            snapshot: baseline.snapshot,
            walk_issues: enumeration.walk_issues,
        })
    }

    /// Compare the live tree against the stored baseline.
    ///
    /// The baseline is loaded first, so a missing or corrupt baseline, or one
    /// hashed with a different algorithm, fails before any file is hashed.
    #[instrument(skip(self), fields(baseline = %self.config.baseline_path.display()))]
    pub fn check(&self, root: &Path) -> Result<CheckOutcome, ApiError> {
        let baseline = self.store.load(&self.config.baseline_path)?;
        if baseline.algorithm != self.config.algorithm {
            return Err(StorageError::AlgorithmMismatch {
                path: self.config.baseline_path.clone(),
                baseline: baseline.algorithm,
                configured: self.config.algorithm,
            }
            .into());
        }

        let enumeration = self.snapshot(root)?;
        let diff = diff::compare(&enumeration.snapshot, &baseline.snapshot);

        let summary = diff.summary();
        info!(
            new = summary.new,
            changed = summary.changed,
            deleted = summary.deleted,
            unchanged = summary.unchanged,
            "Integrity check complete"
        );

        Ok(CheckOutcome {
            root: enumeration.root,
            baseline_path: self.config.baseline_path.clone(),
            unreadable: enumeration
                .snapshot
                .unreadable()
                .into_iter()
                .map(str::to_string)
                .collect(),
            diff,
            walk_issues: enumeration.walk_issues,
        })
    }
}
