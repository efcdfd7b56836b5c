//! Inventory store access.
//!
//! [`InventorySource`] is the seam between the pipeline and the shop
//! database. The sqlx-backed [`SqliteInventoryStore`] talks to a real store;
//! [`InMemoryInventorySource`] serves fixed rows for tests/dev.

pub mod in_memory;
pub mod sqlite;

pub use in_memory::InMemoryInventorySource;
pub use sqlite::SqliteInventoryStore;

use shopsync_core::{DecodingError, EncodingError, InventoryRecord, decode_legacy, encode_legacy};

/// Tables the default inventory query reads.
///
/// Text columns are BLOBs holding Windows-1251 bytes. `GOODS_COST` is kept as
/// text so the store never rounds a price.
pub const INVENTORY_SCHEMA: [&str; 2] = [
    "CREATE TABLE GOODS_GROUP (GROUP_ID INTEGER PRIMARY KEY, GROUP_NAME BLOB)",
    "CREATE TABLE GOODS (GOODS_ID INTEGER PRIMARY KEY AUTOINCREMENT, GROUP_ID INTEGER, \
     GOODS_NAME BLOB, GOODS_ARTICLE BLOB, GOODS_COST TEXT, GOODS_COUNT INTEGER)",
];

/// In-stock goods joined with their group names, in insertion order.
///
/// The predicates (non-empty article, positive cost, positive count) are what
/// guarantee the record invariants downstream. Cost is compared numerically
/// because the column holds text.
pub const INVENTORY_QUERY: &str = "SELECT GR.GROUP_NAME, G.GOODS_NAME, G.GOODS_ARTICLE, \
     CAST(G.GOODS_COST AS TEXT), G.GOODS_COUNT \
     FROM GOODS G LEFT JOIN GOODS_GROUP GR ON GR.GROUP_ID = G.GROUP_ID \
     WHERE length(G.GOODS_ARTICLE) > 0 AND CAST(G.GOODS_COST AS REAL) > 0 AND G.GOODS_COUNT > 0 \
     ORDER BY G.GOODS_ID";

/// Column names, by position, of every inventory query result.
pub const INVENTORY_COLUMNS: [&str; 5] = ["group", "name", "article", "price", "quantity"];

/// Read access to the shop's inventory.
///
/// One call is one complete read: either every row comes back or an error
/// does. Implementations must release any connection before returning.
#[async_trait::async_trait]
pub trait InventorySource: Send + Sync {
    /// Human-readable description of the store, for logs.
    fn describe(&self) -> String;

    /// Fetch all inventory records in store order.
    async fn fetch_inventory(&self) -> Result<Vec<InventoryRecord>, StoreError>;
}

/// A row as scanned from the store, before text normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInventoryRow {
    pub group: Vec<u8>,
    pub name: Vec<u8>,
    pub article: Vec<u8>,
    pub price: String,
    pub quantity: i64,
}

impl RawInventoryRow {
    /// Build the legacy-encoded row a store would hold for `record`.
    pub fn encode(record: &InventoryRecord) -> Result<Self, EncodingError> {
        Ok(Self {
            group: encode_legacy(&record.group)?,
            name: encode_legacy(&record.name)?,
            article: encode_legacy(&record.article)?,
            price: record.price.clone(),
            quantity: record.quantity,
        })
    }

    /// Normalize the text columns; `row` is the zero-based result position.
    pub fn decode(self, row: usize) -> Result<InventoryRecord, StoreError> {
        let text = |bytes: &[u8], column: &'static str| {
            decode_legacy(bytes).map_err(|source| StoreError::Decoding {
                row,
                column,
                source,
            })
        };

        Ok(InventoryRecord {
            group: text(&self.group, "group")?,
            name: text(&self.name, "name")?,
            article: text(&self.article, "article")?,
            price: self.price,
            quantity: self.quantity,
        })
    }
}

/// Store access failure. Every variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect to store {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("inventory query failed: {0}")]
    Query(#[source] sqlx::Error),
    #[error("failed to scan row {row}: {source}")]
    RowScan {
        row: usize,
        #[source]
        source: sqlx::Error,
    },
    #[error("row {row} has NULL in column '{column}'")]
    NullColumn { row: usize, column: &'static str },
    #[error("failed to decode column '{column}' of row {row}: {source}")]
    Decoding {
        row: usize,
        column: &'static str,
        #[source]
        source: DecodingError,
    },
}
