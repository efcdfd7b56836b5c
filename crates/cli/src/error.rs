//! Run-level error and exit code taxonomy.

use shopsync_core::SerializationError;
use shopsync_infra::{ConfigError, DeliveryError, StoreError};

/// Any failure that aborts an export run.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot locate executable directory: {0}")]
    Environment(#[source] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error("unknown mode '{0}' (expected 'file' or 'http')")]
    UnknownMode(String),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl ExportError {
    /// Pipeline stage that failed, for the diagnostic line.
    pub fn stage(&self) -> &'static str {
        match self {
            ExportError::Environment(_) | ExportError::Config(_) => "config",
            ExportError::Store(_) => "store",
            ExportError::Serialization(_) => "serialize",
            ExportError::UnknownMode(_) => "mode",
            ExportError::Delivery(_) => "deliver",
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ExportError::UnknownMode(_) => 2,
            ExportError::Environment(_) | ExportError::Config(_) => 3,
            ExportError::Store(StoreError::Connect { .. }) => 4,
            ExportError::Store(
                StoreError::Query(_) | StoreError::RowScan { .. } | StoreError::NullColumn { .. },
            ) => 5,
            ExportError::Store(StoreError::Decoding { .. }) => 6,
            ExportError::Serialization(_) => 7,
            ExportError::Delivery(DeliveryError::FileWrite { .. }) => 8,
            ExportError::Delivery(DeliveryError::Network { .. } | DeliveryError::Client(_)) => 9,
            ExportError::Delivery(DeliveryError::RejectedStatus { .. }) => 10,
        }
    }
}
