//! JSON persistence for baselines

use crate::error::StorageError;
use crate::store::{Baseline, BaselineStore, Snapshot};
use crate::types::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Top-level key that marks a tagged baseline document
const ALGORITHM_KEY: &str = "algorithm";

/// Document form for digests other than SHA-256
#[derive(Serialize)]
struct TaggedBaselineRef<'a> {
    algorithm: HashAlgorithm,
    files: &'a Snapshot,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TaggedBaseline {
    algorithm: HashAlgorithm,
    files: Snapshot,
}

/// Baseline store writing a pretty-printed JSON document.
///
/// SHA-256 baselines are a flat object of path -> hex digest, with `null`
/// for unreadable entries. Other algorithms wrap that object as
/// `{"algorithm": ..., "files": {...}}`. Paths are absolute, so a flat
/// object never has an `algorithm` key.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBaselineStore;

impl JsonBaselineStore {
    pub fn new() -> Self {
        Self
    }

    /// Serialize with a four-space indent
    pub fn to_json(baseline: &Baseline) -> Result<Vec<u8>, StorageError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        let result = match baseline.algorithm {
            HashAlgorithm::Sha256 => baseline.snapshot.serialize(&mut serializer),
            algorithm => TaggedBaselineRef {
                algorithm,
                files: &baseline.snapshot,
            }
            .serialize(&mut serializer),
        };
        result.map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                ErrorKind::InvalidData,
                format!("Failed to serialize baseline: {}", e),
            ))
        })?;
        out.push(b'\n');
        Ok(out)
    }

    /// Parse a baseline document. `path` is only used in error messages.
    pub fn from_json(bytes: &[u8], path: &Path) -> Result<Baseline, StorageError> {
        let corrupt = |e: serde_json::Error| StorageError::BaselineCorrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let value: serde_json::Value = serde_json::from_slice(bytes).map_err(corrupt)?;
        if value.get(ALGORITHM_KEY).is_some() {
            let tagged: TaggedBaseline = serde_json::from_value(value).map_err(corrupt)?;
            return Ok(Baseline::new(tagged.algorithm, tagged.files));
        }
        let snapshot: Snapshot = serde_json::from_value(value).map_err(corrupt)?;
        Ok(Baseline::new(HashAlgorithm::Sha256, snapshot))
    }

    fn temp_path_for(destination: &Path) -> PathBuf {
        let file_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "baseline".to_string());
        destination.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
    }
}

impl BaselineStore for JsonBaselineStore {
    fn persist(&self, baseline: &Baseline, destination: &Path) -> Result<(), StorageError> {
        let bytes = Self::to_json(baseline)?;

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write beside the target and rename so readers never see a partial file.
        let tmp_path = Self::temp_path_for(destination);
        let write_result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            Ok(())
        })();
        if let Err(e) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(StorageError::IoError(e));
        }
        if let Err(e) = fs::rename(&tmp_path, destination) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StorageError::IoError(e));
        }

        info!(
            baseline = %destination.display(),
            algorithm = %baseline.algorithm,
            entries = baseline.snapshot.len(),
            "Baseline written"
        );
        Ok(())
    }

    fn load(&self, source: &Path) -> Result<Baseline, StorageError> {
        let bytes = match fs::read(source) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::BaselineMissing(source.to_path_buf()));
            }
            Err(e) => return Err(StorageError::IoError(e)),
        };

        let baseline = Self::from_json(&bytes, source)?;
        debug!(
            baseline = %source.display(),
            algorithm = %baseline.algorithm,
            entries = baseline.snapshot.len(),
            "Baseline loaded"
        );
        Ok(baseline)
    }
}
