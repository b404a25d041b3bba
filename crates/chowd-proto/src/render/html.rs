//! Markup for the browser chat client.
//!
//! Each response becomes one left-aligned message bubble: the status line or
//! listing, then the command menu.

use super::Render;
use crate::item::Item;
use crate::response::{MenuEntry, Reply, Response};
use std::fmt::Write;

/// Renders responses as chat-bubble HTML fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRender;

impl Render for HtmlRender {
    fn render(&self, response: &Response) -> String {
        let mut body = String::new();
        match &response.reply {
            Reply::Catalog { items } => {
                status(&mut body, &response.reply.message());
                catalog_list(&mut body, items);
            }
            Reply::Cart { items, .. } => {
                body.push_str("<ul style=\"list-style-type: none\">");
                let _ = write!(body, "<p>{}</p><br/>", escape(&response.reply.message()));
                priced_lines(&mut body, items);
                body.push_str("</ul><br/>");
            }
            Reply::History { orders, total } => {
                body.push_str("<ul style=\"list-style-type: none\">");
                let _ = write!(body, "<p>{}</p><br/>", escape(&response.reply.message()));
                for order in orders {
                    priced_lines(&mut body, &order.items);
                }
                let _ = write!(
                    body,
                    "<br/><p style=\"font-weight: bold;\">Total price: ${total}</p>"
                );
                body.push_str("</ul><br/>");
            }
            reply @ Reply::Fault { .. } => {
                let _ = write!(
                    body,
                    "<p style=\"color: red; font-weight: bold;\">{}</p>",
                    escape(&reply.message())
                );
            }
            reply => status(&mut body, &reply.message()),
        }
        menu(&mut body, response.menu);

        format!("<li class=\"message-left\">\n<p id=\"message\">\n{body}\n</p>\n</li>")
    }
}

fn status(out: &mut String, message: &str) {
    let _ = write!(
        out,
        "<p style=\"font-weight: bold;\">{}</p><br/>",
        escape(message)
    );
}

fn catalog_list(out: &mut String, items: &[Item]) {
    out.push_str("<ul style=\"list-style-type: none\">");
    for item in items {
        let _ = write!(
            out,
            "<li>{} - {} - ( ${} )</li>",
            item.id,
            escape(&item.name),
            item.price
        );
    }
    out.push_str("</ul> <br/>");
}

fn priced_lines(out: &mut String, items: &[Item]) {
    for item in items {
        let _ = write!(
            out,
            "<li style=\"font-weight: bold;\">{} - ${}</li>",
            escape(&item.name),
            item.price
        );
    }
}

fn menu(out: &mut String, entries: &[MenuEntry]) {
    out.push_str("<p id=\"message\">");
    for entry in entries {
        let _ = write!(out, "Select [{}] {} <br/><br/>", entry.token, entry.label);
    }
    out.push_str("</p>");
}

/// Escape text for inclusion in HTML element content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
