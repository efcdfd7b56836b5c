use std::sync::atomic::{AtomicUsize, Ordering};

use shopsync_core::InventoryRecord;

use super::{InventorySource, RawInventoryRow, StoreError};

type ErrorFactory = Box<dyn Fn() -> StoreError + Send + Sync>;

enum Contents {
    Rows(Vec<RawInventoryRow>),
    Failing(ErrorFactory),
}

/// In-memory inventory source.
///
/// Intended for tests/dev. Rows are held legacy-encoded and go through the
/// same decoding as rows scanned from a real store.
pub struct InMemoryInventorySource {
    contents: Contents,
    fetches: AtomicUsize,
}

impl InMemoryInventorySource {
    pub fn with_rows(rows: Vec<RawInventoryRow>) -> Self {
        Self {
            contents: Contents::Rows(rows),
            fetches: AtomicUsize::new(0),
        }
    }

    /// A source whose every fetch fails with the error built by `make_error`.
    pub fn failing(make_error: impl Fn() -> StoreError + Send + Sync + 'static) -> Self {
        Self {
            contents: Contents::Failing(Box::new(make_error)),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of completed or attempted fetches.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl InventorySource for InMemoryInventorySource {
    fn describe(&self) -> String {
        "in-memory".to_string()
    }

    async fn fetch_inventory(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        match &self.contents {
            Contents::Rows(rows) => rows
                .iter()
                .cloned()
                .enumerate()
                .map(|(index, row)| row.decode(index))
                .collect(),
            Contents::Failing(make_error) => Err(make_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_decoded_rows_in_order() {
        let records = vec![
            InventoryRecord::new("Напитки", "Кола", "A100", "12.50", 5),
            InventoryRecord::new("Напитки", "Квас", "A101", "8.00", 2),
        ];
        let rows = records
            .iter()
            .map(|r| RawInventoryRow::encode(r).unwrap())
            .collect();
        let source = InMemoryInventorySource::with_rows(rows);

        assert_eq!(source.fetch_inventory().await.unwrap(), records);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failing_source_reports_error_every_time() {
        let source =
            InMemoryInventorySource::failing(|| StoreError::Query(sqlx::Error::RowNotFound));

        assert!(matches!(source.fetch_inventory().await, Err(StoreError::Query(_))));
        assert!(matches!(source.fetch_inventory().await, Err(StoreError::Query(_))));
        assert_eq!(source.fetch_count(), 2);
    }
}
