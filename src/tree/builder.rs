//! Snapshot builder: enumerate a directory and hash every regular file

use crate::error::StorageError;
use crate::store::Snapshot;
use crate::tree::hasher::{self, CHUNK_SIZE};
use crate::tree::walker::{FileEntry, WalkIssue, Walker, WalkerConfig};
use crate::types::{EntryState, HashAlgorithm};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, instrument, warn};

/// Snapshot plus what went wrong along the way
#[derive(Debug, Clone)]
pub struct Enumeration {
    /// Canonical root the snapshot was taken from
    pub root: PathBuf,
    pub snapshot: Snapshot,
    /// Entries below the root the walker could not visit
    pub walk_issues: Vec<WalkIssue>,
}

/// Builds a [`Snapshot`] for one directory tree
pub struct SnapshotBuilder {
    root: PathBuf,
    algorithm: HashAlgorithm,
    chunk_size: usize,
    walker_config: WalkerConfig,
}

impl SnapshotBuilder {
    /// Create a new builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            algorithm: HashAlgorithm::default(),
            chunk_size: CHUNK_SIZE,
            walker_config: WalkerConfig::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Leave one file (normally the baseline) out of the snapshot
    pub fn skip_file(mut self, file: &Path) -> Self {
        self.walker_config.skip_files.push(file.to_path_buf());
        self
    }

    /// Walk the tree and hash each regular file.
    ///
    /// Fails only when the root cannot be walked. A file that cannot be
    /// hashed is recorded as [`EntryState::Unreadable`] and the walk goes on.
    #[instrument(skip(self), fields(root = %self.root.display(), algorithm = %self.algorithm))]
    pub fn build(&self) -> Result<Enumeration, StorageError> {
        let start = Instant::now();
        info!("Starting enumeration");

        let walker = Walker::with_config(self.root.clone(), self.walker_config.clone());
        let outcome = match walker.walk() {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Filesystem walk failed: {}", e);
                return Err(e);
            }
        };

        let snapshot = hash_files(&outcome.files, self.algorithm, self.chunk_size);
        let unreadable = snapshot.unreadable().len();

        info!(
            files = snapshot.len(),
            unreadable,
            walk_issues = outcome.issues.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Enumeration complete"
        );

        Ok(Enumeration {
            root: outcome.root,
            snapshot,
            walk_issues: outcome.issues,
        })
    }
}

/// Hash each walked file into a snapshot keyed by [`FileEntry::key`].
///
/// A file that fails to hash (gone, locked, a read error partway) becomes
/// [`EntryState::Unreadable`]; the other files are unaffected.
fn hash_files(files: &[FileEntry], algorithm: HashAlgorithm, chunk_size: usize) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for file in files {
        let state = match hasher::digest_file_chunked(&file.path, algorithm, chunk_size) {
            Ok(digest) => EntryState::Hashed(digest),
            Err(e) => {
                warn!(path = %file.path.display(), error = %e, "Could not hash file");
                EntryState::Unreadable
            }
        };
        snapshot.insert(file.key.clone(), state);
    }
    snapshot
}

/// Enumerate `root` with default settings
pub fn enumerate(root: &Path) -> Result<Snapshot, StorageError> {
    SnapshotBuilder::new(root.to_path_buf())
        .build()
        .map(|enumeration| enumeration.snapshot)
}
