//! Path canonicalization and snapshot keys

use crate::error::StorageError;
use std::path::{Path, PathBuf};

/// Canonicalize a monitored root so snapshot keys are absolute and stable
///
/// Resolves `.`, `..` and symlinks in the root itself via `dunce`, which also
/// avoids `\\?\` prefixes on Windows.
pub fn canonicalize_root(root: &Path) -> Result<PathBuf, StorageError> {
    dunce::canonicalize(root).map_err(|e| StorageError::RootInaccessible {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Canonicalize a path that may not exist yet (e.g. a baseline about to be
/// written). Falls back to joining the canonical parent with the file name.
pub fn canonicalize_lenient(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return Some(canonical);
    }
    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    dunce::canonicalize(parent)
        .ok()
        .map(|p| p.join(file_name))
}

/// Snapshot key for a filesystem path: its exact text.
///
/// No normalization is applied, so distinct names always give distinct keys.
/// Returns `None` for paths that are not valid UTF-8.
pub fn path_key(path: &Path) -> Option<String> {
    path.to_str().map(str::to_owned)
}
