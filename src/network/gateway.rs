//! Gateway - TCP and WebSocket listeners that accept incoming connections.
//!
//! The Gateway binds to sockets and spawns a Connection task for each
//! incoming client. Every connection gets a fresh id from a shared
//! [`UidGenerator`], so ids are unique across both listeners.

use super::connection::Connection;
use super::transport::Transport;
use crate::config::{Config, LimitsConfig, WebSocketConfig};
use crate::dispatch::Dispatcher;
use crate::metrics;
use crate::state::UidGenerator;
use crate::telemetry::spans;
use chowd_proto::RenderFormat;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tracing::{Instrument, error, info, instrument, warn};

/// The Gateway accepts incoming connections and spawns handlers.
pub struct Gateway {
    plaintext_listener: TcpListener,
    plaintext_render: RenderFormat,
    websocket_listener: Option<(TcpListener, WebSocketConfig)>,
    dispatcher: Dispatcher,
    limits: LimitsConfig,
    uid_gen: Arc<UidGenerator>,
}

impl Gateway {
    /// Bind the listeners named in `config`.
    pub async fn bind(config: &Config, dispatcher: Dispatcher) -> anyhow::Result<Self> {
        let plaintext_listener = TcpListener::bind(config.listen.address).await?;
        info!(address = %plaintext_listener.local_addr()?, render = %config.listen.render, "Plaintext listener bound");

        let websocket_listener = if let Some(ws_cfg) = &config.websocket {
            let listener = TcpListener::bind(ws_cfg.address).await?;
            info!(address = %listener.local_addr()?, render = %ws_cfg.render, "WebSocket listener bound");
            Some((listener, ws_cfg.clone()))
        } else {
            None
        };

        Ok(Self {
            plaintext_listener,
            plaintext_render: config.listen.render,
            websocket_listener,
            dispatcher,
            limits: config.limits.clone(),
            uid_gen: Arc::new(UidGenerator::default()),
        })
    }

    /// Address the plaintext listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.plaintext_listener.local_addr()
    }

    /// Address the WebSocket listener is bound to, if configured.
    pub fn websocket_addr(&self) -> Option<SocketAddr> {
        self.websocket_listener
            .as_ref()
            .and_then(|(listener, _)| listener.local_addr().ok())
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        if let Some((ws_listener, ws_config)) = self.websocket_listener {
            let dispatcher = self.dispatcher.clone();
            let limits = self.limits.clone();
            let uid_gen = Arc::clone(&self.uid_gen);
            tokio::spawn(
                accept_websockets(ws_listener, ws_config, dispatcher, limits, uid_gen)
                    .in_current_span(),
            );
        }

        loop {
            match self.plaintext_listener.accept().await {
                Ok((stream, addr)) => {
                    let id = self.uid_gen.next();
                    let transport = Transport::lines(stream, self.limits.max_line_length);
                    let connection = Connection::new(
                        id.clone(),
                        addr,
                        transport,
                        self.dispatcher.clone(),
                        self.plaintext_render,
                        &self.limits,
                    );
                    tokio::spawn(
                        async move {
                            if let Err(e) = connection.run().await {
                                error!(error = %e, "Plaintext connection error");
                            }
                        }
                        .instrument(spans::connection(&id, &addr.to_string(), "lines")),
                    );
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept plaintext connection");
                }
            }
        }
    }
}

async fn accept_websockets(
    listener: TcpListener,
    config: WebSocketConfig,
    dispatcher: Dispatcher,
    limits: LimitsConfig,
    uid_gen: Arc<UidGenerator>,
) {
    let allowed = Arc::new(config.allow_origins);
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let id = uid_gen.next();
                let span = spans::connection(&id, &addr.to_string(), "websocket");
                let handshake = websocket_handshake(
                    stream,
                    addr,
                    Arc::clone(&allowed),
                    id,
                    dispatcher.clone(),
                    config.render,
                    limits.clone(),
                );
                tokio::spawn(handshake.instrument(span));
            }
            Err(e) => {
                error!(error = %e, "Failed to accept WebSocket connection");
            }
        }
    }
}

async fn websocket_handshake(
    stream: TcpStream,
    addr: SocketAddr,
    allowed: Arc<Vec<String>>,
    id: String,
    dispatcher: Dispatcher,
    render: RenderFormat,
    limits: LimitsConfig,
) {
    let check_origin = |req: &Request, response: Response| -> Result<Response, ErrorResponse> {
        let origin = req.headers().get("Origin").and_then(|o| o.to_str().ok());
        if origin_allowed(&allowed, origin) {
            return Ok(response);
        }
        warn!(origin = origin.unwrap_or("<none>"), "WebSocket origin rejected");
        metrics::record_origin_rejected();
        let mut forbidden = ErrorResponse::new(Some("Origin not allowed".to_string()));
        *forbidden.status_mut() = http::StatusCode::FORBIDDEN;
        Err(forbidden)
    };

    let deadline = Duration::from_secs(limits.handshake_timeout);
    let accept = accept_hdr_async(stream, check_origin);
    let handshake = match tokio::time::timeout(deadline, accept).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_secs = limits.handshake_timeout, "WebSocket handshake timed out");
            return;
        }
    };

    match handshake {
        Ok(ws_stream) => {
            let transport = Transport::websocket(ws_stream, limits.max_line_length);
            let connection = Connection::new(id, addr, transport, dispatcher, render, &limits);
            if let Err(e) = connection.run().await {
                error!(error = %e, "WebSocket connection error");
            }
        }
        Err(e) => {
            warn!(error = %e, "WebSocket handshake failed");
        }
    }
}

/// Whether a handshake carrying `origin` passes the allow-list.
///
/// An empty list allows everything, including requests without an Origin
/// header. `"*"` in the list allows any origin that is present.
pub fn origin_allowed(allowed: &[String], origin: Option<&str>) -> bool {
    if allowed.is_empty() {
        return true;
    }
    origin.is_some_and(|origin| allowed.iter().any(|a| a == origin || a == "*"))
}
