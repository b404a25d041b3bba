//! Integration test common infrastructure.
//!
//! Provides an in-process test server and line/WebSocket test clients with
//! receive timeouts.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::{TestClient, WsTestClient};
#[allow(unused_imports)]
pub use server::TestServer;
