//! Network listener configuration.

use chowd_proto::RenderFormat;
use serde::Deserialize;
use std::net::SocketAddr;

/// Plaintext listener configuration. One command per line.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:4400").
    pub address: SocketAddr,
    /// How responses are rendered on this listener.
    #[serde(default)]
    pub render: RenderFormat,
}

/// WebSocket listener configuration. One command per text frame.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketConfig {
    /// Address to bind to for WebSocket (e.g., "0.0.0.0:8080").
    pub address: SocketAddr,
    /// Allowed origins for CORS (e.g., `["https://example.com"]`).
    /// Empty list allows all origins.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    /// How responses are rendered on this listener.
    #[serde(default = "default_websocket_render")]
    pub render: RenderFormat,
}

fn default_websocket_render() -> RenderFormat {
    RenderFormat::Html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listen_config_deserialize() {
        let toml_str = r#"
            address = "0.0.0.0:4400"
        "#;
        let cfg: ListenConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.address.port(), 4400);
        assert_eq!(cfg.render, RenderFormat::Text);
    }

    #[test]
    fn listen_config_with_json() {
        let toml_str = r#"
            address = "0.0.0.0:4400"
            render = "json"
        "#;
        let cfg: ListenConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.render, RenderFormat::Json);
    }

    #[test]
    fn websocket_config_deserialize_defaults() {
        let toml_str = r#"
            address = "0.0.0.0:8080"
        "#;
        let cfg: WebSocketConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.address.port(), 8080);
        assert!(cfg.allow_origins.is_empty());
        assert_eq!(cfg.render, RenderFormat::Html);
    }

    #[test]
    fn websocket_config_with_origins() {
        let toml_str = r#"
            address = "0.0.0.0:8080"
            allow_origins = ["https://example.com", "https://another.com"]
        "#;
        let cfg: WebSocketConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.allow_origins.len(), 2);
        assert_eq!(cfg.allow_origins[0], "https://example.com");
    }

    #[test]
    fn unknown_render_format_is_rejected() {
        let toml_str = r#"
            address = "0.0.0.0:4400"
            render = "xml"
        "#;
        assert!(toml::from_str::<ListenConfig>(toml_str).is_err());
    }
}
