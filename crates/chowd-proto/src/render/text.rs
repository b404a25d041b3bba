//! Plain text for line-oriented clients.

use super::Render;
use crate::item::Item;
use crate::response::{Reply, Response, Severity};
use std::fmt::Write;

/// Renders responses as indented plain text.
///
/// Error replies are prefixed with `!` so scripts can spot them without
/// parsing the wording.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRender;

impl Render for TextRender {
    fn render(&self, response: &Response) -> String {
        let mut out = String::new();
        if response.severity == Severity::Error {
            out.push_str("! ");
        }
        out.push_str(&response.reply.message());
        out.push('\n');

        match &response.reply {
            Reply::Catalog { items } => {
                for item in items {
                    let _ = writeln!(out, "  {item}");
                }
            }
            Reply::Cart { items, total } => {
                lines(&mut out, items);
                let _ = writeln!(out, "  Total: ${total}");
            }
            Reply::History { orders, total } => {
                for (n, order) in orders.iter().enumerate() {
                    let _ = writeln!(out, "  Order #{}", n + 1);
                    for item in &order.items {
                        let _ = writeln!(out, "    {} - ${}", item.name, item.price);
                    }
                }
                let _ = writeln!(out, "  Total price: ${total}");
            }
            _ => {}
        }

        out.push('\n');
        for entry in response.menu {
            let _ = writeln!(out, "Select [{}] {}", entry.token, entry.label);
        }
        out
    }
}

fn lines(out: &mut String, items: &[Item]) {
    for item in items {
        let _ = writeln!(out, "  {} - ${}", item.name, item.price);
    }
}
