//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task and processes its commands
//! strictly in order, so a session never has more than one command in flight:
//!
//! ```text
//!   open ──▶ welcome ──▶ ┌───────────── read frame ◀────────────┐
//!                        │                                      │
//!                        ├─ too long ──▶ LineTooLong fault ─────┤
//!                        ├─ flood ─────▶ Flood fault ──▶ close  │
//!                        └─ command ───▶ dispatch ──▶ render ───┘
//!
//!   EOF / I/O error ──▶ close ──▶ session removed
//! ```

use super::limit::RateLimiter;
use super::transport::Transport;
use crate::config::LimitsConfig;
use crate::dispatch::Dispatcher;
use crate::metrics;
use crate::state::ConnectionId;
use chowd_proto::{Fault, Render, RenderFormat, Response};
use std::net::SocketAddr;
use tracing::{debug, info, warn};

/// A client connection handler.
pub struct Connection {
    id: ConnectionId,
    addr: SocketAddr,
    transport: Transport,
    dispatcher: Dispatcher,
    render: RenderFormat,
    limiter: RateLimiter,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        addr: SocketAddr,
        transport: Transport,
        dispatcher: Dispatcher,
        render: RenderFormat,
        limits: &LimitsConfig,
    ) -> Self {
        Self {
            id,
            addr,
            transport,
            dispatcher,
            render,
            limiter: RateLimiter::from_limits(limits),
        }
    }

    /// Run the connection until the peer leaves, floods, or the socket fails.
    ///
    /// The session is removed on every exit path.
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!(addr = %self.addr, transport = self.transport.kind(), "Client connected");

        let welcome = self.dispatcher.open(&self.id);
        let result = self.serve(welcome).await;

        self.transport.close().await;
        self.dispatcher.close(&self.id);
        info!(addr = %self.addr, "Client disconnected");
        result
    }

    async fn serve(&mut self, welcome: Response) -> anyhow::Result<()> {
        self.send(&welcome).await?;

        loop {
            let line = match self.transport.read_frame().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("Peer closed connection");
                    return Ok(());
                }
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "Input line too long");
                    self.send(&Response::fault(Fault::LineTooLong)).await?;
                    continue;
                }
                Err(e) => {
                    debug!(error = %e, "Read error");
                    return Ok(());
                }
            };

            if !self.limiter.check() {
                metrics::record_rate_limited();
                warn!("Flood limit exceeded, closing connection");
                self.send(&Response::fault(Fault::Flood)).await?;
                return Ok(());
            }

            debug!(raw = %line, "Received command");
            let response = self.dispatcher.dispatch(&self.id, &line);
            self.send(&response).await?;
        }
    }

    async fn send(&mut self, response: &Response) -> anyhow::Result<()> {
        let rendered = self.render.render(response);
        self.transport.write_frame(&rendered).await
    }
}
