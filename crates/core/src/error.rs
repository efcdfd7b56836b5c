//! Domain error model.

use thiserror::Error;

/// A legacy-encoded field contained a byte with no mapping in the code page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {code_page} byte 0x{byte:02X} at offset {offset}")]
pub struct DecodingError {
    pub code_page: &'static str,
    pub offset: usize,
    pub byte: u8,
}

/// Text contained a character the legacy code page cannot represent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("character {ch:?} cannot be represented in {code_page}")]
pub struct EncodingError {
    pub code_page: &'static str,
    pub ch: char,
}

/// The record collection could not be turned into a document.
#[derive(Debug, Error)]
#[error("failed to serialize inventory document: {0}")]
pub struct SerializationError(#[from] pub serde_json::Error);
