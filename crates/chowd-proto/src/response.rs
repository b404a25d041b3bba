//! Structured responses.
//!
//! A [`Response`] is plain data: a [`Reply`] describing what happened plus the
//! static [`MENU`] of commands the client can send next. Turning it into
//! markup or text is the job of [`crate::render`].

use crate::item::{Item, PlacedOrder};
use serde::Serialize;

/// How a client should present a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The command changed state as requested.
    Success,
    /// A listing, or a command that had nothing to act on.
    Info,
    /// The command could not be honoured.
    Error,
}

/// Failures raised outside the order state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fault {
    /// No session is bound to the connection.
    SessionNotFound,
    /// The transition could not be computed.
    Internal,
    /// The client exceeded its message rate.
    Flood,
    /// The client sent a frame longer than the configured limit.
    LineTooLong,
}

impl Fault {
    /// Human-readable text shown to the client.
    pub fn message(&self) -> &'static str {
        match self {
            Self::SessionNotFound => "Session not found",
            Self::Internal => "An error occurred while processing your request",
            Self::Flood => "Excess flood",
            Self::LineTooLong => "Input line too long",
        }
    }
}

/// The operation-specific part of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// Greeting sent when a connection opens.
    Welcome,
    /// Full catalog, in declared order.
    Catalog {
        /// Catalog items.
        items: Vec<Item>,
    },
    /// An item was appended to the cart.
    ItemAdded {
        /// The item that was added.
        item: Item,
    },
    /// The requested id does not name a catalog item.
    InvalidSelection,
    /// Current cart contents.
    Cart {
        /// Items in selection order.
        items: Vec<Item>,
        /// Sum of item prices.
        total: u64,
    },
    /// The cart is empty.
    NoCurrentOrder,
    /// The cart was emptied.
    CartCancelled,
    /// Cancel was requested on an empty cart.
    NothingToCancel,
    /// The cart was recorded in history and emptied.
    OrderPlaced {
        /// The order as recorded.
        order: PlacedOrder,
    },
    /// Checkout was requested on an empty cart.
    NothingToPlace,
    /// Every placed order with the grand total.
    History {
        /// Placed orders, oldest first.
        orders: Vec<PlacedOrder>,
        /// Sum of every item price across every order.
        total: u64,
    },
    /// No order has been placed yet.
    NoHistory,
    /// A dispatcher-level failure.
    Fault {
        /// What went wrong.
        fault: Fault,
    },
}

impl Reply {
    /// Presentation severity of this reply.
    pub fn severity(&self) -> Severity {
        match self {
            Self::ItemAdded { .. } | Self::CartCancelled | Self::OrderPlaced { .. } => {
                Severity::Success
            }
            Self::InvalidSelection | Self::Fault { .. } => Severity::Error,
            Self::Welcome
            | Self::Catalog { .. }
            | Self::Cart { .. }
            | Self::NoCurrentOrder
            | Self::NothingToCancel
            | Self::NothingToPlace
            | Self::History { .. }
            | Self::NoHistory => Severity::Info,
        }
    }

    /// The status line for this reply.
    ///
    /// Listings return their heading.
    pub fn message(&self) -> String {
        match self {
            Self::Welcome => "Welcome! Choose an option below to start your order.".to_string(),
            Self::Catalog { .. } => "Select the meal number to add to your order.".to_string(),
            Self::ItemAdded { item } => format!(
                "{} added to your order. You can add more items or proceed to checkout.",
                item.name
            ),
            Self::InvalidSelection => "Invalid selection. Please try again.".to_string(),
            Self::Cart { .. } => "Your current order:".to_string(),
            Self::NoCurrentOrder => "You have not placed an order yet.".to_string(),
            Self::CartCancelled => "Your current order has been cancelled.".to_string(),
            Self::NothingToCancel => "No order to cancel.".to_string(),
            Self::OrderPlaced { .. } => {
                "Order placed successfully! Would you like to place another order?".to_string()
            }
            Self::NothingToPlace => "No order to place.".to_string(),
            Self::History { .. } => "Your order history:".to_string(),
            Self::NoHistory => "No order history found.".to_string(),
            Self::Fault { fault } => fault.message().to_string(),
        }
    }

    /// Static name used for logging and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Catalog { .. } => "catalog",
            Self::ItemAdded { .. } => "item_added",
            Self::InvalidSelection => "invalid_selection",
            Self::Cart { .. } => "cart",
            Self::NoCurrentOrder => "no_current_order",
            Self::CartCancelled => "cart_cancelled",
            Self::NothingToCancel => "nothing_to_cancel",
            Self::OrderPlaced { .. } => "order_placed",
            Self::NothingToPlace => "nothing_to_place",
            Self::History { .. } => "history",
            Self::NoHistory => "no_history",
            Self::Fault { .. } => "fault",
        }
    }
}

/// One line of the command menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    /// Token the client sends.
    pub token: &'static str,
    /// What the token does.
    pub label: &'static str,
}

/// The commands a client can send, attached to every response.
pub const MENU: &[MenuEntry] = &[
    MenuEntry {
        token: "1",
        label: "place an order",
    },
    MenuEntry {
        token: "99",
        label: "to checkout order",
    },
    MenuEntry {
        token: "98",
        label: "to see order history",
    },
    MenuEntry {
        token: "97",
        label: "to see current order",
    },
    MenuEntry {
        token: "0",
        label: "to cancel order",
    },
];

/// A reply paired with the command menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// What happened.
    pub reply: Reply,
    /// Severity of `reply`, duplicated for clients that only read this field.
    pub severity: Severity,
    /// Next available commands.
    pub menu: &'static [MenuEntry],
}

impl Response {
    /// Wrap `reply` with the standard menu.
    pub fn new(reply: Reply) -> Self {
        Self {
            severity: reply.severity(),
            reply,
            menu: MENU,
        }
    }

    /// A response carrying a dispatcher-level fault.
    pub fn fault(fault: Fault) -> Self {
        Self::new(Reply::Fault { fault })
    }

    /// The fault carried by this response, if any.
    pub fn as_fault(&self) -> Option<Fault> {
        match self.reply {
            Reply::Fault { fault } => Some(fault),
            _ => None,
        }
    }
}

impl From<Reply> for Response {
    fn from(reply: Reply) -> Self {
        Self::new(reply)
    }
}
