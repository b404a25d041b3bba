//! Network module.
//!
//! Contains the Gateway (TCP and WebSocket listeners), the Connection
//! handler, framed transports and rate limiting.

mod connection;
mod gateway;
pub mod limit;
mod transport;

pub use connection::Connection;
pub use gateway::{Gateway, origin_allowed};
pub use transport::{Transport, TransportReadError};
