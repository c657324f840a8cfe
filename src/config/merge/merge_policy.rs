//! Merge rules: defaults applied before any source.

use crate::config::DEFAULT_BASELINE_FILE;
use crate::tree::hasher::CHUNK_SIZE;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("baseline.path", DEFAULT_BASELINE_FILE)?
        .set_default("hashing.algorithm", "sha256")?
        .set_default("hashing.chunk_size", CHUNK_SIZE as i64)
}
