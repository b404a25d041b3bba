//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig)
//! - [`listen`]: Network listener configuration (ListenConfig, WebSocketConfig)
//! - [`limits`]: Per-connection input limits (LimitsConfig)
//! - [`catalog`]: Catalog seed data (CatalogConfig, ItemConfig)
//! - [`validation`]: Startup checks over a loaded Config

mod catalog;
mod limits;
mod listen;
mod types;
mod validation;

pub use catalog::{CatalogConfig, ItemConfig};
pub use limits::LimitsConfig;
pub use listen::{ListenConfig, WebSocketConfig};
pub use types::{Config, ConfigError, ServerConfig};
pub use validation::{ValidationError, validate};
