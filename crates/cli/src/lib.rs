//! `shopsync-cli`
//!
//! **Responsibility:** the export run itself: argument parsing, wiring the
//! configuration into the store and sinks, and the linear
//! read → serialize → deliver pipeline.

pub mod cli;
pub mod error;
pub mod pipeline;

pub use cli::{Cli, run};
pub use error::ExportError;
pub use pipeline::{ExportSummary, FixedSinks, Pipeline, RunMode, SinkSelector};
