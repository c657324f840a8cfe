//! Snapshot comparison
//!
//! Classifies every path of two snapshots as New, Changed, Deleted or
//! Unchanged. Pure: no I/O and no failure cases.

use crate::store::Snapshot;
use serde::Serialize;

/// Four disjoint path lists, each in snapshot path order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub new: Vec<String>,
    pub changed: Vec<String>,
    pub deleted: Vec<String>,
    pub unchanged: Vec<String>,
}

/// Per-category counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub new: usize,
    pub changed: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl DiffResult {
    /// True when anything was added, modified or removed
    pub fn has_changes(&self) -> bool {
        !(self.new.is_empty() && self.changed.is_empty() && self.deleted.is_empty())
    }

    pub fn is_clean(&self) -> bool {
        !self.has_changes()
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            new: self.new.len(),
            changed: self.changed.len(),
            deleted: self.deleted.len(),
            unchanged: self.unchanged.len(),
        }
    }
}

/// Compare the live snapshot against the baseline.
///
/// Entry states are compared as a whole, so a file that turned unreadable
/// (or readable again) counts as Changed rather than New or Deleted.
pub fn compare(current: &Snapshot, baseline: &Snapshot) -> DiffResult {
    let mut result = DiffResult::default();

    for (path, state) in current {
        match baseline.get(path) {
            None => result.new.push(path.clone()),
            Some(old) if old == state => result.unchanged.push(path.clone()),
            Some(_) => result.changed.push(path.clone()),
        }
    }

    for path in baseline.paths() {
        if !current.contains(path) {
            result.deleted.push(path.clone());
        }
    }

    result
}
