//! `shopsync-core`: inventory export domain.
//!
//! This crate contains the **pure** parts of the export pipeline: the record
//! model, legacy text normalization, and document serialization. No IO lives
//! here; the store, sinks and configuration belong to `shopsync-infra`.

pub mod document;
pub mod encoding;
pub mod error;
pub mod record;

pub use document::serialize;
pub use encoding::{UNDEFINED_LEGACY_BYTE, decode_legacy, encode_legacy, legacy_code_page};
pub use error::{DecodingError, EncodingError, SerializationError};
pub use record::InventoryRecord;
