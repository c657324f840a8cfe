//! Snapshot Store
//!
//! A `Snapshot` maps every regular file under a root to its content digest.
//! Snapshots are built by [`crate::tree::builder::SnapshotBuilder`] and
//! persisted as a [`Baseline`] through a [`BaselineStore`].

pub mod persistence;

pub use persistence::JsonBaselineStore;

use crate::error::StorageError;
use crate::types::{Digest, EntryState, HashAlgorithm};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Point-in-time mapping from file path to entry state.
///
/// Keys are ordered, so iteration and serialization are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<String, EntryState>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path. A later insert for the same path replaces the earlier one.
    pub fn insert(&mut self, path: impl Into<String>, state: EntryState) {
        self.entries.insert(path.into(), state);
    }

    pub fn insert_digest(&mut self, path: impl Into<String>, digest: Digest) {
        self.insert(path, EntryState::Hashed(digest));
    }

    pub fn get(&self, path: &str) -> Option<&EntryState> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EntryState)> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Paths recorded with the unreadable marker
    pub fn unreadable(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, state)| state.is_unreadable())
            .map(|(path, _)| path.as_str())
            .collect()
    }
}

impl FromIterator<(String, EntryState)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, EntryState)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a String, &'a EntryState);
    type IntoIter = std::collections::btree_map::Iter<'a, String, EntryState>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A stored snapshot together with the algorithm that produced its digests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub algorithm: HashAlgorithm,
    pub snapshot: Snapshot,
}

impl Baseline {
    pub fn new(algorithm: HashAlgorithm, snapshot: Snapshot) -> Self {
        Self {
            algorithm,
            snapshot,
        }
    }
}

/// Persisted baseline interface
pub trait BaselineStore {
    /// Write the baseline, replacing anything already at `destination`.
    fn persist(&self, baseline: &Baseline, destination: &Path) -> Result<(), StorageError>;

    /// Read a baseline back. A missing file is `StorageError::BaselineMissing`.
    fn load(&self, source: &Path) -> Result<Baseline, StorageError>;
}
