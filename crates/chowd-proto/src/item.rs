//! Catalog items and placed orders.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Numeric identifier of a catalog item.
pub type ItemId = u32;

/// A purchasable catalog entry.
///
/// Prices are integers in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Item {
    /// Stable identifier, unique within a catalog.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Price in the smallest currency unit.
    pub price: u64,
}

impl Item {
    /// Create a new item.
    pub fn new(id: ItemId, name: impl Into<String>, price: u64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - (${})", self.id, self.name, self.price)
    }
}

/// Sum the prices of `items`, returning `None` on overflow.
pub fn sum_prices<'a, I>(items: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .try_fold(0u64, |acc, item| acc.checked_add(item.price))
}

/// A snapshot of a cart taken at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedOrder {
    /// Items in selection order.
    pub items: Vec<Item>,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl PlacedOrder {
    /// Snapshot `items` as an order placed now.
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            placed_at: Utc::now(),
        }
    }

    /// Sum of item prices in this order, `None` on overflow.
    pub fn subtotal(&self) -> Option<u64> {
        sum_prices(&self.items)
    }
}
