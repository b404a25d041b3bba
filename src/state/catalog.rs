//! The catalog of purchasable items.
//!
//! Built once at startup from configuration and shared read-only behind an
//! `Arc`; it has no mutation API.

use crate::config::CatalogConfig;
use chowd_proto::{Item, ItemId};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Reasons a list of items cannot form a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no items")]
    Empty,
    #[error("item id must be positive")]
    ZeroId,
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
    #[error("item {0} has an empty name")]
    EmptyName(ItemId),
}

/// Collect every problem with `items`, in declaration order.
pub fn catalog_problems(items: &[Item]) -> Vec<CatalogError> {
    let mut problems = Vec::new();
    if items.is_empty() {
        problems.push(CatalogError::Empty);
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.id == 0 {
            problems.push(CatalogError::ZeroId);
        }
        if item.name.trim().is_empty() {
            problems.push(CatalogError::EmptyName(item.id));
        }
        if !seen.insert(item.id) {
            problems.push(CatalogError::DuplicateId(item.id));
        }
    }
    problems
}

/// An immutable, ordered list of items with O(1) lookup by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting the first problem found.
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        if let Some(problem) = catalog_problems(&items).into_iter().next() {
            return Err(problem);
        }

        let index = items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id, pos))
            .collect();
        Ok(Self { items, index })
    }

    /// Resolve an item by id.
    pub fn lookup(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    /// All items in declared order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TryFrom<&CatalogConfig> for Catalog {
    type Error = CatalogError;

    fn try_from(cfg: &CatalogConfig) -> Result<Self, Self::Error> {
        Self::new(cfg.items.iter().map(Item::from).collect())
    }
}
