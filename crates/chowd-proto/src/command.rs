//! Command classification.
//!
//! Every raw token a client sends maps to exactly one [`Command`]. Parsing is
//! total: anything that is not a reserved token is an attempt to add an item,
//! and a token with no usable number is an attempt that matches nothing.

use crate::item::ItemId;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A classified client instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// List the catalog (`1`).
    ShowCatalog,
    /// Place the current cart as an order (`99`).
    Checkout,
    /// List every placed order (`98`).
    ViewHistory,
    /// List the current cart (`97`).
    ViewCart,
    /// Empty the current cart (`0`).
    CancelCart,
    /// Add the item with this id to the cart.
    ///
    /// `None` means the token carried no usable id and can match no item.
    AddItem(Option<ItemId>),
}

impl Command {
    /// Reserved token for [`Command::ShowCatalog`].
    pub const SHOW_CATALOG: &'static str = "1";
    /// Reserved token for [`Command::Checkout`].
    pub const CHECKOUT: &'static str = "99";
    /// Reserved token for [`Command::ViewHistory`].
    pub const VIEW_HISTORY: &'static str = "98";
    /// Reserved token for [`Command::ViewCart`].
    pub const VIEW_CART: &'static str = "97";
    /// Reserved token for [`Command::CancelCart`].
    pub const CANCEL_CART: &'static str = "0";

    /// Classify a raw token.
    ///
    /// Surrounding whitespace is ignored; otherwise reserved tokens must match
    /// exactly (`"099"` is not a checkout).
    pub fn parse(raw: &str) -> Self {
        let token = raw.trim();
        match token {
            Self::SHOW_CATALOG => Self::ShowCatalog,
            Self::CHECKOUT => Self::Checkout,
            Self::VIEW_HISTORY => Self::ViewHistory,
            Self::VIEW_CART => Self::ViewCart,
            Self::CANCEL_CART => Self::CancelCart,
            other => Self::AddItem(leading_id(other)),
        }
    }

    /// Static name used for logging and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowCatalog => "show_catalog",
            Self::Checkout => "checkout",
            Self::ViewHistory => "view_history",
            Self::ViewCart => "view_cart",
            Self::CancelCart => "cancel_cart",
            Self::AddItem(_) => "add_item",
        }
    }

    /// The reserved token for this command, if it has one.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Self::ShowCatalog => Some(Self::SHOW_CATALOG),
            Self::Checkout => Some(Self::CHECKOUT),
            Self::ViewHistory => Some(Self::VIEW_HISTORY),
            Self::ViewCart => Some(Self::VIEW_CART),
            Self::CancelCart => Some(Self::CANCEL_CART),
            Self::AddItem(_) => None,
        }
    }
}

/// Read the integer at the start of `token`, the way a lenient numeric
/// client field does: optional sign, then digits, trailing text ignored.
///
/// Negative values and values outside `ItemId` cannot name an item and
/// come back as `None`.
fn leading_id(token: &str) -> Option<ItemId> {
    let unsigned = token.strip_prefix('+').unwrap_or(token);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_end == 0 {
        return None;
    }
    unsigned[..digits_end].parse().ok()
}

impl FromStr for Command {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.token(), self) {
            (Some(token), _) => f.write_str(token),
            (None, Self::AddItem(Some(id))) => write!(f, "{id}"),
            (None, _) => f.write_str("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_tokens() {
        assert_eq!(Command::parse("1"), Command::ShowCatalog);
        assert_eq!(Command::parse("99"), Command::Checkout);
        assert_eq!(Command::parse("98"), Command::ViewHistory);
        assert_eq!(Command::parse("97"), Command::ViewCart);
        assert_eq!(Command::parse("0"), Command::CancelCart);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(Command::parse(" 99\r"), Command::Checkout);
        assert_eq!(Command::parse("\t4 "), Command::AddItem(Some(4)));
    }

    #[test]
    fn reserved_match_is_exact() {
        assert_eq!(Command::parse("099"), Command::AddItem(Some(99)));
        assert_eq!(Command::parse("00"), Command::AddItem(Some(0)));
        assert_eq!(Command::parse("1x"), Command::AddItem(Some(1)));
    }

    #[test]
    fn non_numeric_is_unmatchable_add() {
        assert_eq!(Command::parse("abc"), Command::AddItem(None));
        assert_eq!(Command::parse(""), Command::AddItem(None));
        assert_eq!(Command::parse("-"), Command::AddItem(None));
    }

    #[test]
    fn leading_digits_are_used() {
        assert_eq!(Command::parse("4 please"), Command::AddItem(Some(4)));
        assert_eq!(Command::parse("10.5"), Command::AddItem(Some(10)));
        assert_eq!(Command::parse("+6"), Command::AddItem(Some(6)));
    }

    #[test]
    fn negative_and_oversized_ids_match_nothing() {
        assert_eq!(Command::parse("-2"), Command::AddItem(None));
        assert_eq!(Command::parse("99999999999999"), Command::AddItem(None));
    }

    #[test]
    fn from_str_is_infallible() {
        let cmd: Command = "97".parse().unwrap();
        assert_eq!(cmd, Command::ViewCart);
    }

    #[test]
    fn display_round_trips_reserved() {
        for token in ["1", "99", "98", "97", "0"] {
            assert_eq!(Command::parse(token).to_string(), token);
        }
        assert_eq!(Command::AddItem(Some(8)).to_string(), "8");
        assert_eq!(Command::AddItem(None).to_string(), "?");
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(Command::Checkout.name(), "checkout");
        assert_eq!(Command::AddItem(None).name(), "add_item");
    }
}
