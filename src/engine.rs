//! Order engine: the per-session state machine.
//!
//! `apply` maps (command, session) to (response, next session). It reads the
//! catalog, never mutates its input, and has no terminal state: every command
//! is accepted in every state, and the state only decides what the reply says.
//!
//! ```text
//!  ShowCatalog / ViewCart / ViewHistory      AddItem(known id)
//!          (no change)                         cart += item
//!              │                                   │
//!              ▼                                   ▼
//!        ┌───────────────────────────────────────────────┐
//!        │          Session { cart, history }            │
//!        └───────────────────────────────────────────────┘
//!              ▲                                   ▲
//!              │                                   │
//!        CancelCart                         Checkout (cart non-empty)
//!        cart = []                  history += snapshot(cart); cart = []
//! ```

use crate::error::{EngineError, EngineResult};
use crate::state::{Catalog, Session};
use chowd_proto::{Command, Item, ItemId, PlacedOrder, Reply, Response};
use std::sync::Arc;

/// The outcome of applying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// What to send back.
    pub response: Response,
    /// The session to commit.
    pub session: Session,
}

/// Applies commands to sessions against a shared catalog.
#[derive(Debug, Clone)]
pub struct OrderEngine {
    catalog: Arc<Catalog>,
}

impl OrderEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Compute the response and next session for `command`.
    pub fn apply(&self, command: &Command, session: &Session) -> EngineResult<Transition> {
        let mut next = session.clone();
        let reply = match *command {
            Command::ShowCatalog => Reply::Catalog {
                items: self.catalog.items().to_vec(),
            },
            Command::AddItem(candidate) => match self.resolve(candidate) {
                Some(item) => {
                    next.cart.push(item.clone());
                    Reply::ItemAdded { item: item.clone() }
                }
                None => Reply::InvalidSelection,
            },
            Command::ViewCart => {
                if next.cart.is_empty() {
                    Reply::NoCurrentOrder
                } else {
                    Reply::Cart {
                        items: next.cart.items().to_vec(),
                        total: next.cart.total().ok_or(EngineError::TotalOverflow)?,
                    }
                }
            }
            Command::CancelCart => {
                if next.cart.take().is_empty() {
                    Reply::NothingToCancel
                } else {
                    Reply::CartCancelled
                }
            }
            Command::Checkout => {
                if next.cart.is_empty() {
                    Reply::NothingToPlace
                } else {
                    let order = PlacedOrder::new(next.cart.take());
                    order.subtotal().ok_or(EngineError::TotalOverflow)?;
                    next.history.record(order.clone());
                    Reply::OrderPlaced { order }
                }
            }
            Command::ViewHistory => {
                if next.history.is_empty() {
                    Reply::NoHistory
                } else {
                    Reply::History {
                        orders: next.history.orders().to_vec(),
                        total: next.history.grand_total().ok_or(EngineError::TotalOverflow)?,
                    }
                }
            }
        };

        Ok(Transition {
            response: Response::new(reply),
            session: next,
        })
    }

    fn resolve(&self, candidate: Option<ItemId>) -> Option<&Item> {
        candidate.and_then(|id| self.catalog.lookup(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use chowd_proto::Severity;

    fn engine() -> OrderEngine {
        let catalog = Catalog::try_from(&CatalogConfig::default()).unwrap();
        OrderEngine::new(Arc::new(catalog))
    }

    /// Run raw tokens through the engine, returning the final transition.
    fn run(engine: &OrderEngine, tokens: &[&str]) -> Transition {
        let mut session = Session::new("test");
        let mut last = None;
        for token in tokens {
            let t = engine.apply(&Command::parse(token), &session).unwrap();
            session = t.session.clone();
            last = Some(t);
        }
        last.expect("at least one token")
    }

    #[test]
    fn show_catalog_lists_everything_unchanged() {
        let engine = engine();
        let session = Session::new("s");
        let t = engine.apply(&Command::ShowCatalog, &session).unwrap();
        match &t.response.reply {
            Reply::Catalog { items } => {
                let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
                assert_eq!(names, ["beans", "jollof-rice", "ice-cream", "noodles", "swallow"]);
            }
            other => panic!("expected catalog, got {other:?}"),
        }
        assert_eq!(t.session, session);
    }

    #[test]
    fn add_known_item_appends() {
        let t = run(&engine(), &["4", "2", "4"]);
        let ids: Vec<_> = t.session.cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, [4, 2, 4]);
        assert_eq!(
            t.response.reply,
            Reply::ItemAdded {
                item: Item::new(4, "jollof-rice", 60)
            }
        );
        assert_eq!(t.response.severity, Severity::Success);
    }

    #[test]
    fn add_unknown_item_is_invalid_and_unchanged() {
        let engine = engine();
        let mut session = Session::new("s");
        session.cart.push(Item::new(2, "beans", 75));
        for token in ["3", "abc", "-4", "", "00"] {
            let t = engine.apply(&Command::parse(token), &session).unwrap();
            assert_eq!(t.response.reply, Reply::InvalidSelection, "token {token:?}");
            assert_eq!(t.session.cart, session.cart);
        }
    }

    #[test]
    fn view_cart() {
        let engine = engine();
        let t = run(&engine, &["97"]);
        assert_eq!(t.response.reply, Reply::NoCurrentOrder);

        let t = run(&engine, &["8", "6", "97"]);
        assert_eq!(
            t.response.reply,
            Reply::Cart {
                items: vec![Item::new(8, "noodles", 50), Item::new(6, "ice-cream", 20)],
                total: 70,
            }
        );
        assert_eq!(t.session.cart.len(), 2);
    }

    #[test]
    fn cancel_cart() {
        let engine = engine();
        let t = run(&engine, &["0"]);
        assert_eq!(t.response.reply, Reply::NothingToCancel);
        assert!(t.session.cart.is_empty());

        let t = run(&engine, &["2", "10", "0"]);
        assert_eq!(t.response.reply, Reply::CartCancelled);
        assert!(t.session.cart.is_empty());
        assert!(t.session.history.is_empty());
    }

    #[test]
    fn checkout_on_empty_cart_changes_nothing() {
        let t = run(&engine(), &["99"]);
        assert_eq!(t.response.reply, Reply::NothingToPlace);
        assert!(t.session.history.is_empty());
        assert!(t.session.cart.is_empty());
    }

    #[test]
    fn checkout_moves_cart_into_history() {
        let t = run(&engine(), &["4", "2", "99"]);
        match &t.response.reply {
            Reply::OrderPlaced { order } => {
                assert_eq!(order.items, [Item::new(4, "jollof-rice", 60), Item::new(2, "beans", 75)]);
            }
            other => panic!("expected order placed, got {other:?}"),
        }
        assert!(t.session.cart.is_empty());
        assert_eq!(t.session.history.len(), 1);
    }

    #[test]
    fn reference_scenario_history_total() {
        let t = run(&engine(), &["1", "4", "2", "99", "98"]);
        match &t.response.reply {
            Reply::History { orders, total } => {
                assert_eq!(orders.len(), 1);
                assert_eq!(
                    orders[0].items,
                    [Item::new(4, "jollof-rice", 60), Item::new(2, "beans", 75)]
                );
                assert_eq!(*total, 135);
            }
            other => panic!("expected history, got {other:?}"),
        }
    }

    #[test]
    fn history_total_spans_orders() {
        let t = run(&engine(), &["2", "99", "10", "10", "99", "0", "98"]);
        match &t.response.reply {
            Reply::History { orders, total } => {
                assert_eq!(orders.len(), 2);
                assert_eq!(*total, 75 + 200 + 200);
            }
            other => panic!("expected history, got {other:?}"),
        }
    }

    #[test]
    fn empty_history() {
        let t = run(&engine(), &["2", "98"]);
        assert_eq!(t.response.reply, Reply::NoHistory);
    }

    #[test]
    fn apply_never_mutates_input() {
        let engine = engine();
        let mut session = Session::new("s");
        session.cart.push(Item::new(2, "beans", 75));
        let before = session.clone();
        for cmd in [Command::Checkout, Command::CancelCart, Command::AddItem(Some(4))] {
            engine.apply(&cmd, &session).unwrap();
            assert_eq!(session, before);
        }
    }

    #[test]
    fn overflowing_total_is_an_error() {
        let catalog = Catalog::new(vec![Item::new(1, "gold", u64::MAX)]).unwrap();
        let engine = OrderEngine::new(Arc::new(catalog));
        let mut session = Session::new("s");
        for cmd in [Command::AddItem(Some(1)), Command::AddItem(Some(1))] {
            session = engine.apply(&cmd, &session).unwrap().session;
        }
        assert_eq!(
            engine.apply(&Command::ViewCart, &session),
            Err(EngineError::TotalOverflow)
        );
        assert_eq!(
            engine.apply(&Command::Checkout, &session),
            Err(EngineError::TotalOverflow)
        );
    }

    #[test]
    fn every_response_has_menu() {
        let engine = engine();
        let session = Session::new("s");
        for token in ["1", "99", "98", "97", "0", "4", "zz"] {
            let t = engine.apply(&Command::parse(token), &session).unwrap();
            assert_eq!(t.response.menu, chowd_proto::MENU);
        }
    }
}
