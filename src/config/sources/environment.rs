//! Environment variable source: FILEGUARD__* with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `FILEGUARD__HASHING__ALGORITHM=blake3` sets `hashing.algorithm`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("FILEGUARD")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
