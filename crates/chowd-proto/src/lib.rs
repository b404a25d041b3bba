//! # chowd-proto
//!
//! The vocabulary spoken between an ordering client and the chowd daemon:
//!
//! - [`Item`] and [`PlacedOrder`], the data a session is built from
//! - [`Command`], the closed set of instructions a raw text token maps to
//! - [`Response`], [`Reply`] and [`Fault`], the structured result of a command
//! - [`Render`], which turns a response into something a client can display
//!
//! ## Quick Start
//!
//! ```rust
//! use chowd_proto::{Command, Render, RenderFormat, Reply, Response};
//!
//! assert_eq!(Command::parse("99"), Command::Checkout);
//! assert_eq!(Command::parse("4"), Command::AddItem(Some(4)));
//!
//! let response = Response::new(Reply::NothingToPlace);
//! let text = RenderFormat::Text.render(&response);
//! assert!(text.contains("No order to place."));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod item;
pub mod render;
pub mod response;

pub use command::Command;
pub use item::{Item, ItemId, PlacedOrder, sum_prices};
pub use render::{HtmlRender, JsonRender, Render, RenderFormat, TextRender, UnknownFormat};
pub use response::{Fault, MENU, MenuEntry, Reply, Response, Severity};
