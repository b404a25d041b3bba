//! chowd - a conversational food-ordering daemon.
//!
//! Clients connect over plaintext TCP or WebSocket and drive a per-connection
//! cart and order history with short numeric commands. The daemon binary in
//! `main.rs` wires these modules together; integration tests and benchmarks
//! drive them directly.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod http;
pub mod metrics;
pub mod network;
pub mod state;
pub mod telemetry;

pub use dispatch::Dispatcher;
pub use engine::{OrderEngine, Transition};
pub use error::{DispatchError, EngineError};
