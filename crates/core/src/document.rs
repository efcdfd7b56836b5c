//! Export document serialization.
//!
//! The document is a compact JSON array of [`InventoryRecord`] objects. It is
//! both the file body (file mode) and the POST body (http mode).

use crate::error::SerializationError;
use crate::record::InventoryRecord;

/// Serialize records into the export document, preserving their order.
///
/// An empty slice yields `[]`.
pub fn serialize(records: &[InventoryRecord]) -> Result<Vec<u8>, SerializationError> {
    Ok(serde_json::to_vec(records)?)
}
