//! The export pipeline: read → serialize → deliver, once.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use shopsync_infra::{DeliveryReport, DeliverySink, InventorySource};

use crate::error::ExportError;

/// Which sink receives the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    File,
    #[default]
    Http,
}

impl FromStr for RunMode {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(RunMode::File),
            "http" => Ok(RunMode::Http),
            other => Err(ExportError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::File => f.write_str("file"),
            RunMode::Http => f.write_str("http"),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub records: usize,
    pub bytes: usize,
    pub mode: RunMode,
    pub report: DeliveryReport,
}

/// Builds the sink for a mode, only once the mode is known.
///
/// Nothing about a sink that the run does not use is touched, so an `http`
/// setting cannot fail a `file` run.
pub trait SinkSelector: Send + Sync {
    fn sink_for(&self, mode: RunMode) -> Result<Arc<dyn DeliverySink>, ExportError>;
}

/// Two ready-made sinks, one per mode.
pub struct FixedSinks {
    pub file: Arc<dyn DeliverySink>,
    pub http: Arc<dyn DeliverySink>,
}

impl SinkSelector for FixedSinks {
    fn sink_for(&self, mode: RunMode) -> Result<Arc<dyn DeliverySink>, ExportError> {
        let sink = match mode {
            RunMode::File => &self.file,
            RunMode::Http => &self.http,
        };
        Ok(sink.clone())
    }
}

/// One store and a sink selector; the mode token picks the sink per run.
pub struct Pipeline {
    source: Arc<dyn InventorySource>,
    sinks: Arc<dyn SinkSelector>,
}

impl Pipeline {
    pub fn new(source: Arc<dyn InventorySource>, sinks: Arc<dyn SinkSelector>) -> Self {
        Self { source, sinks }
    }

    /// Run the export.
    ///
    /// The store is always read before `mode` is looked at, so an unknown
    /// mode still pays for the extraction but never reaches a sink.
    pub async fn run(&self, mode: &str) -> Result<ExportSummary, ExportError> {
        tracing::info!(source = %self.source.describe(), "reading inventory");
        let records = self.source.fetch_inventory().await?;
        let payload = shopsync_core::serialize(&records)?;

        let mode: RunMode = mode.parse()?;
        let sink = self.sinks.sink_for(mode)?;
        tracing::info!(
            %mode,
            sink = %sink.describe(),
            records = records.len(),
            "delivering export"
        );

        let report = sink.deliver(&payload).await?;

        Ok(ExportSummary {
            records: records.len(),
            bytes: payload.len(),
            mode,
            report,
        })
    }
}
