//! fileguard: Directory Integrity Monitoring
//!
//! Records a content digest for every regular file under a directory, persists
//! that snapshot as a JSON baseline, and later reports which files are new,
//! changed, deleted or unchanged relative to it.

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod report;
pub mod store;
pub mod tree;
pub mod types;

pub use diff::{compare, DiffResult};
pub use error::{ApiError, HashError, StorageError};
pub use monitor::{CheckOutcome, CreateOutcome, Mode, Monitor, MonitorConfig};
pub use store::{Baseline, BaselineStore, JsonBaselineStore, Snapshot};
pub use types::{Digest, EntryState, HashAlgorithm};
