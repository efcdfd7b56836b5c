//! Command line surface and run wiring.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use shopsync_infra::config::CONFIG_FILE_NAME;
use shopsync_infra::sink::file::EXPORT_FILE_NAME;
use shopsync_infra::{DeliverySink, FileSink, HttpSink, RunConfiguration, SqliteInventoryStore};
use shopsync_observability::LogFormat;

use crate::error::ExportError;
use crate::pipeline::{ExportSummary, Pipeline, RunMode, SinkSelector};

/// Export shop inventory to a local file or a remote import endpoint.
#[derive(Debug, Clone, Parser)]
#[command(name = "shopsync", version)]
pub struct Cli {
    /// Delivery mode: `file` or `http`.
    #[arg(default_value = "http")]
    pub mode: String,

    /// Configuration file [default: config.json next to the executable]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Export file for `file` mode [default: export.json next to the executable]
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Log line format: `json` or `text`.
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    pub log_format: LogFormat,
}

/// Load configuration, build the store and sinks, and run the pipeline once.
pub async fn run(cli: &Cli) -> Result<ExportSummary, ExportError> {
    let config_path = beside_executable(cli.config.as_deref(), CONFIG_FILE_NAME)?;
    tracing::info!(path = %config_path.display(), "reading configuration file");
    let config = RunConfiguration::load(&config_path)?;
    tracing::debug!(?config, "configuration loaded");

    let output = beside_executable(cli.output.as_deref(), EXPORT_FILE_NAME)?;

    let store = Arc::new(SqliteInventoryStore::from_config(&config));
    let sinks = Arc::new(ConfiguredSinks { config, output });

    Pipeline::new(store, sinks).run(&cli.mode).await
}

/// Sinks built from the run configuration on first use.
struct ConfiguredSinks {
    config: RunConfiguration,
    output: PathBuf,
}

impl SinkSelector for ConfiguredSinks {
    fn sink_for(&self, mode: RunMode) -> Result<Arc<dyn DeliverySink>, ExportError> {
        let sink: Arc<dyn DeliverySink> = match mode {
            RunMode::File => Arc::new(FileSink::new(self.output.clone())),
            RunMode::Http => Arc::new(HttpSink::from_config(&self.config)?),
        };
        Ok(sink)
    }
}

/// `explicit` if given, otherwise `file_name` in the executable's directory.
fn beside_executable(explicit: Option<&Path>, file_name: &str) -> Result<PathBuf, ExportError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let exe = std::env::current_exe().map_err(ExportError::Environment)?;
    let dir = exe.parent().ok_or_else(|| {
        ExportError::Environment(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })?;
    Ok(dir.join(file_name))
}
