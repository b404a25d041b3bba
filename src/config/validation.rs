//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use crate::state::{CatalogError, catalog_problems};
use chowd_proto::Item;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("limits.max_line_length must be greater than zero")]
    ZeroLineLength,
    #[error("limits.message_rate must be positive, got {0}")]
    InvalidMessageRate(f32),
    #[error("limits.message_burst must be at least 1, got {0}")]
    InvalidMessageBurst(f32),
    #[error("limits.handshake_timeout must be greater than zero")]
    ZeroHandshakeTimeout,
    #[error("websocket.address must differ from listen.address ({0})")]
    ListenerAddressClash(std::net::SocketAddr),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.trim().is_empty() {
        errors.push(ValidationError::MissingServerName);
    }

    let items: Vec<Item> = config.catalog.items.iter().map(Item::from).collect();
    errors.extend(catalog_problems(&items).into_iter().map(ValidationError::from));

    let limits = &config.limits;
    if limits.max_line_length == 0 {
        errors.push(ValidationError::ZeroLineLength);
    }
    if limits.message_rate.is_nan() || limits.message_rate <= 0.0 {
        errors.push(ValidationError::InvalidMessageRate(limits.message_rate));
    }
    if limits.message_burst.is_nan() || limits.message_burst < 1.0 {
        errors.push(ValidationError::InvalidMessageBurst(limits.message_burst));
    }
    if limits.handshake_timeout == 0 {
        errors.push(ValidationError::ZeroHandshakeTimeout);
    }

    if let Some(ws) = &config.websocket
        && ws.address == config.listen.address
        && ws.address.port() != 0
    {
        errors.push(ValidationError::ListenerAddressClash(ws.address));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
