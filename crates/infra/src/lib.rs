//! Infrastructure layer: configuration, store access, delivery sinks.

pub mod config;
pub mod sink;
pub mod store;

pub use config::{ConfigError, RunConfiguration};
pub use sink::{DeliveryError, DeliveryReport, DeliverySink, FileSink, HttpSink};
pub use store::{
    INVENTORY_QUERY, INVENTORY_SCHEMA, InMemoryInventorySource, InventorySource, RawInventoryRow,
    SqliteInventoryStore, StoreError,
};
