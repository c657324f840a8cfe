//! CLI route: run context built from parsed args. Dispatches to the monitor and a reporter.

use crate::cli::parse::Cli;
use crate::config::{ConfigLoader, FileguardConfig};
use crate::error::{ApiError, StorageError};
use crate::monitor::{Mode, Monitor, MonitorConfig};
use crate::report::{JsonReporter, Reporter, TextReporter};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

/// Report format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Runtime context for one CLI invocation: mode, target directory, monitor and reporter choice.
pub struct RunContext {
    mode: Mode,
    directory: PathBuf,
    format: OutputFormat,
    color: bool,
    monitor: Monitor,
}

impl RunContext {
    /// Resolve mode, configuration and flag overrides.
    ///
    /// The mode is checked before any file is read.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mode = Mode::from_str(&cli.mode)?;
        let format = OutputFormat::from_str(&cli.format)?;

        let mut config = load_config(cli.config.as_deref())?;
        if let Some(ref baseline) = cli.baseline {
            config.baseline.path = baseline.clone();
        }
        config.ensure_valid()?;
        debug!(config = ?config, "Configuration resolved");

        Ok(Self {
            mode,
            directory: cli.directory.clone(),
            format,
            color: !cli.no_color,
            monitor: Monitor::new(MonitorConfig::from(&config)),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Run the selected mode and write the report to `out`.
    pub fn execute(&self, out: &mut dyn Write) -> Result<(), ApiError> {
        let start = Instant::now();
        let reporter = self.reporter();

        match self.mode {
            Mode::Create => {
                let outcome = self.monitor.create(&self.directory)?;
                reporter
                    .report_created(&outcome, out)
                    .map_err(StorageError::from)?;
            }
            Mode::Check => {
                let outcome = self.monitor.check(&self.directory)?;
                reporter
                    .report_check(&outcome, out)
                    .map_err(StorageError::from)?;
            }
        }

        info!(
            mode = %self.mode,
            duration_ms = start.elapsed().as_millis() as u64,
            "Command completed"
        );
        Ok(())
    }

    fn reporter(&self) -> Box<dyn Reporter> {
        match self.format {
            OutputFormat::Text => Box::new(TextReporter::new(self.color)),
            OutputFormat::Json => Box::new(JsonReporter),
        }
    }
}

/// Load configuration from an explicit file or from the working directory.
pub(crate) fn load_config(config_path: Option<&Path>) -> Result<FileguardConfig, ApiError> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load(Path::new("."))?,
    };
    Ok(config)
}
