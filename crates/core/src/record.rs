use serde::{Deserialize, Serialize};

/// One sellable item snapshot, as exported.
///
/// Field order is part of the wire contract: the serializer emits fields in
/// declaration order (`group`, `name`, `article`, `price`, `quantity`).
///
/// `price` stays textual so currency values never pass through a float.
/// Records are produced by a store query that already filters out empty
/// articles and non-positive prices/quantities; they are not re-validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub group: String,
    pub name: String,
    pub article: String,
    pub price: String,
    pub quantity: i64,
}

impl InventoryRecord {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        article: impl Into<String>,
        price: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            article: article.into(),
            price: price.into(),
            quantity,
        }
    }
}
