//! Filesystem walker for enumerating the regular files under a root

use crate::error::StorageError;
use crate::tree::path;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A regular file found during the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Snapshot key, see [`path::path_key`]
    pub key: String,
}

/// An entry below the root that could not be visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkIssue {
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Result of one walk: files in path order plus non-fatal issues
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    /// Canonical root that was walked
    pub root: PathBuf,
    pub files: Vec<FileEntry>,
    pub issues: Vec<WalkIssue>,
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Exact files to leave out of the walk (the baseline file itself)
    pub skip_files: Vec<PathBuf>,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Canonical root, checked to be a readable directory.
    ///
    /// This is the only failure the walk reports; everything below the root
    /// is best effort.
    pub fn resolve_root(&self) -> Result<PathBuf, StorageError> {
        let root = path::canonicalize_root(&self.root)?;
        let metadata = fs::metadata(&root).map_err(|e| StorageError::RootInaccessible {
            path: self.root.clone(),
            reason: e.to_string(),
        })?;
        if !metadata.is_dir() {
            return Err(StorageError::RootInaccessible {
                path: self.root.clone(),
                reason: "not a directory".to_string(),
            });
        }
        fs::read_dir(&root).map_err(|e| StorageError::RootInaccessible {
            path: self.root.clone(),
            reason: e.to_string(),
        })?;
        Ok(root)
    }

    /// Walk the tree and collect every regular file.
    ///
    /// Symlinks are not followed and, like sockets and FIFOs, are not
    /// recorded. Names that are not valid UTF-8 cannot be keyed and are
    /// reported as issues. Files come back sorted by path.
    pub fn walk(&self) -> Result<WalkOutcome, StorageError> {
        let root = self.resolve_root()?;
        let skip: Vec<PathBuf> = self
            .config
            .skip_files
            .iter()
            .filter_map(|p| path::canonicalize_lenient(p))
            .collect();

        let mut outcome = WalkOutcome {
            root: root.clone(),
            ..WalkOutcome::default()
        };
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    if e.depth() == 0 {
                        return Err(StorageError::RootInaccessible {
                            path: self.root.clone(),
                            reason: e.to_string(),
                        });
                    }
                    let issue_path = e.path().map(Path::to_path_buf);
                    warn!(
                        path = ?issue_path,
                        error = %e,
                        "Skipping entry that could not be walked"
                    );
                    outcome.issues.push(WalkIssue {
                        path: issue_path,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                debug!(path = %entry.path().display(), "Skipping non-regular file");
                continue;
            }
            if skip.iter().any(|s| s == entry.path()) {
                debug!(path = %entry.path().display(), "Skipping baseline file");
                continue;
            }

            let key = match path::path_key(entry.path()) {
                Some(key) => key,
                None => {
                    warn!(path = ?entry.path(), "Skipping file with a non UTF-8 name");
                    outcome.issues.push(WalkIssue {
                        path: Some(entry.into_path()),
                        message: "file name is not valid UTF-8".to_string(),
                    });
                    continue;
                }
            };
            outcome.files.push(FileEntry {
                path: entry.into_path(),
                key,
            });
        }

        outcome.files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(outcome)
    }
}
