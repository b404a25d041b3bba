//! Per-connection ordering state.
//!
//! A [`Session`] bundles the in-progress [`Cart`] and the append-only
//! [`History`] of one connection. Sessions are plain values: the order engine
//! takes one by reference and hands back the next one, so a transition that
//! fails halfway never leaves a stored session half-updated.

use chowd_proto::{Item, PlacedOrder, sum_prices};
use chrono::{DateTime, Utc};

/// Identifier assigned to a connection by the gateway.
pub type ConnectionId = String;

/// Items selected but not yet checked out, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<Item>,
}

impl Cart {
    /// Append an item. Repeated selections are kept as separate entries.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices, `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        sum_prices(&self.items)
    }

    /// Empty the cart, returning what it held.
    pub fn take(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }
}

/// Orders placed on this session, oldest first.
///
/// Append-only: there is no way to remove or edit a recorded order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    orders: Vec<PlacedOrder>,
}

impl History {
    /// Record a placed order.
    pub fn record(&mut self, order: PlacedOrder) {
        self.orders.push(order);
    }

    pub fn orders(&self) -> &[PlacedOrder] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Sum of every item price across every order, `None` on overflow.
    pub fn grand_total(&self) -> Option<u64> {
        sum_prices(self.orders.iter().flat_map(|order| order.items.iter()))
    }
}

/// Ordering state bound to one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: ConnectionId,
    pub cart: Cart,
    pub history: History,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    /// A fresh session with an empty cart and history.
    pub fn new(id: impl Into<ConnectionId>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            cart: Cart::default(),
            history: History::default(),
            created_at: now,
            last_active: now,
        }
    }

    /// Mark the session as used now.
    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}
