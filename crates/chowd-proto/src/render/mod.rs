//! Presentation of responses.
//!
//! Rendering is a pure function of a [`Response`]: no session state, no I/O.
//! Each listener picks one [`RenderFormat`].

mod html;
mod text;

pub use html::HtmlRender;
pub use text::TextRender;

use crate::response::Response;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Turns a response into a displayable string.
pub trait Render: Send + Sync {
    /// Render `response`.
    fn render(&self, response: &Response) -> String;
}

/// Renders the response as a JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRender;

impl Render for JsonRender {
    fn render(&self, response: &Response) -> String {
        match serde_json::to_string(response) {
            Ok(json) => json,
            Err(_) => {
                r#"{"reply":{"kind":"fault","fault":"internal"},"severity":"error","menu":[]}"#
                    .to_string()
            }
        }
    }
}

/// Selects a renderer by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Markup for the browser chat client.
    Html,
    /// Plain text for line-oriented clients.
    #[default]
    Text,
    /// JSON for programmatic clients.
    Json,
}

impl Render for RenderFormat {
    fn render(&self, response: &Response) -> String {
        match self {
            Self::Html => HtmlRender.render(response),
            Self::Text => TextRender.render(response),
            Self::Json => JsonRender.render(response),
        }
    }
}

/// Returned when parsing an unknown [`RenderFormat`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown render format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for RenderFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Html => "html",
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}
