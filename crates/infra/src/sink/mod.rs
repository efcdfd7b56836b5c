//! Delivery sinks: where the serialized export document goes.

pub mod file;
pub mod http;

pub use file::FileSink;
pub use http::HttpSink;

use std::path::PathBuf;

/// Accepts a serialized document and delivers it somewhere, once.
#[async_trait::async_trait]
pub trait DeliverySink: Send + Sync {
    /// Human-readable destination, for logs.
    fn describe(&self) -> String;

    async fn deliver(&self, payload: &[u8]) -> Result<DeliveryReport, DeliveryError>;
}

/// What a successful delivery did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryReport {
    Written { path: PathBuf, bytes: usize },
    /// The remote answered with `status`, whatever it was. Only a sink built
    /// with `fail_on_error_status(true)` turns a non-2xx answer into
    /// [`DeliveryError::RejectedStatus`] instead.
    Posted { status: u16 },
}

/// Delivery failure.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("remote {url} rejected the export with status {status}")]
    RejectedStatus { url: String, status: u16 },
}
