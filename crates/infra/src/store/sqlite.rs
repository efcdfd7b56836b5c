//! sqlx-backed inventory store.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Connection, Decode, Row, Sqlite, Type};

use shopsync_core::InventoryRecord;

use super::{INVENTORY_COLUMNS, INVENTORY_QUERY, InventorySource, RawInventoryRow, StoreError};
use crate::config::RunConfiguration;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Inventory store reached through a single, short-lived sqlx connection.
///
/// The store is opened read-only. Text columns are read as raw bytes and
/// normalized from the legacy code page; price must come back as text and
/// quantity as an integer.
#[derive(Debug, Clone)]
pub struct SqliteInventoryStore {
    url: String,
    query: String,
    busy_timeout: Duration,
}

impl SqliteInventoryStore {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: INVENTORY_QUERY.to_string(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn from_config(config: &RunConfiguration) -> Self {
        let store = Self::new(config.store_url()).with_busy_timeout(config.store_timeout());
        match &config.query {
            Some(query) => store.with_query(query.clone()),
            None => store,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    async fn connect(&self) -> Result<SqliteConnection, StoreError> {
        let connect_err = |source| StoreError::Connect {
            target: self.url.clone(),
            source,
        };

        let options = SqliteConnectOptions::from_str(&self.url)
            .map_err(connect_err)?
            .read_only(true)
            .busy_timeout(self.busy_timeout);

        SqliteConnection::connect_with(&options)
            .await
            .map_err(connect_err)
    }

    async fn read_records(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<InventoryRecord>, StoreError> {
        let rows = sqlx::query(&self.query)
            .fetch_all(&mut *conn)
            .await
            .map_err(StoreError::Query)?;

        rows.iter()
            .enumerate()
            .map(|(index, row)| scan_row(index, row)?.decode(index))
            .collect()
    }
}

#[async_trait::async_trait]
impl InventorySource for SqliteInventoryStore {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_inventory(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        tracing::info!(store = %self.url, "connecting to store");

        let mut conn = self.connect().await?;
        let result = self.read_records(&mut conn).await;

        // Release the connection on every path; a failed close does not
        // change the outcome of the read.
        if let Err(err) = conn.close().await {
            tracing::warn!(error = %err, "failed to close store connection");
        }

        let records = result?;
        tracing::info!(count = records.len(), "total products found");
        Ok(records)
    }
}

fn scan_row(index: usize, row: &SqliteRow) -> Result<RawInventoryRow, StoreError> {
    Ok(RawInventoryRow {
        group: column(row, index, 0)?,
        name: column(row, index, 1)?,
        article: column(row, index, 2)?,
        price: column(row, index, 3)?,
        quantity: column(row, index, 4)?,
    })
}

fn column<'r, T>(row: &'r SqliteRow, index: usize, position: usize) -> Result<T, StoreError>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get::<Option<T>, _>(position)
        .map_err(|source| StoreError::RowScan { row: index, source })?
        .ok_or(StoreError::NullColumn {
            row: index,
            column: INVENTORY_COLUMNS[position],
        })
}
