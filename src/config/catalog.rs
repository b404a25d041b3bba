//! Catalog seed configuration.

use chowd_proto::{Item, ItemId};
use serde::Deserialize;

/// Items offered for sale, in display order.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Catalog entries. Defaults to the house menu.
    #[serde(default = "default_items")]
    pub items: Vec<ItemConfig>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items: default_items(),
        }
    }
}

/// One `[[catalog.items]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemConfig {
    pub id: ItemId,
    pub name: String,
    pub price: u64,
}

impl From<&ItemConfig> for Item {
    fn from(cfg: &ItemConfig) -> Self {
        Item::new(cfg.id, cfg.name.clone(), cfg.price)
    }
}

fn default_items() -> Vec<ItemConfig> {
    [
        (2, "beans", 75),
        (4, "jollof-rice", 60),
        (6, "ice-cream", 20),
        (8, "noodles", 50),
        (10, "swallow", 200),
    ]
    .into_iter()
    .map(|(id, name, price)| ItemConfig {
        id,
        name: name.to_string(),
        price,
    })
    .collect()
}
