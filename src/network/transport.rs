//! Framed text transport over plaintext TCP and WebSocket.
//!
//! Both transports carry one command per frame: a newline-terminated line on
//! TCP, a text message on WebSocket. Outbound responses are written as one
//! frame each; on TCP a rendered response may span several lines.

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};
use tracing::debug;

/// Errors that can occur when reading a frame.
#[derive(Debug, Error)]
pub enum TransportReadError {
    /// The frame exceeded the configured limit. The frame was discarded and
    /// the transport is still usable.
    #[error("input line longer than {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

impl TransportReadError {
    /// Whether the connection can keep reading after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::LineTooLong { .. })
    }
}

/// A connection's framed stream.
pub enum Transport {
    /// Newline-delimited text over TCP.
    Lines {
        framed: Framed<TcpStream, LinesCodec>,
        limit: usize,
        /// Set after a decode error; the stream then yields `None` once
        /// before resuming.
        errored: bool,
    },
    /// Text messages over WebSocket.
    WebSocket {
        stream: WebSocketStream<TcpStream>,
        limit: usize,
    },
}

impl Transport {
    /// Wrap a TCP stream in a line codec capped at `limit` bytes per line.
    pub fn lines(stream: TcpStream, limit: usize) -> Self {
        Self::Lines {
            framed: Framed::new(stream, LinesCodec::new_with_max_length(limit)),
            limit,
            errored: false,
        }
    }

    /// Wrap an accepted WebSocket, capping text messages at `limit` bytes.
    pub fn websocket(stream: WebSocketStream<TcpStream>, limit: usize) -> Self {
        Self::WebSocket { stream, limit }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lines { .. } => "lines",
            Self::WebSocket { .. } => "websocket",
        }
    }

    /// Read the next inbound frame.
    ///
    /// Returns `Ok(None)` when the peer closed the connection.
    pub async fn read_frame(&mut self) -> Result<Option<String>, TransportReadError> {
        match self {
            Self::Lines {
                framed,
                limit,
                errored,
            } => loop {
                match framed.next().await {
                    Some(Ok(line)) => {
                        *errored = false;
                        return Ok(Some(line));
                    }
                    Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                        *errored = true;
                        return Err(TransportReadError::LineTooLong { limit: *limit });
                    }
                    Some(Err(LinesCodecError::Io(e))) => return Err(e.into()),
                    None if *errored => *errored = false,
                    None => return Ok(None),
                }
            },
            Self::WebSocket { stream, limit } => read_websocket_frame(stream, *limit).await,
        }
    }

    /// Write one outbound frame.
    pub async fn write_frame(&mut self, text: &str) -> anyhow::Result<()> {
        match self {
            Self::Lines { framed, .. } => {
                framed.send(text.trim_end_matches(['\r', '\n'])).await?;
            }
            Self::WebSocket { stream, .. } => {
                stream.send(WsMessage::Text(text.to_string())).await?;
            }
        }
        Ok(())
    }

    /// Close the transport, flushing any buffered output.
    pub async fn close(&mut self) {
        let result = match self {
            Self::Lines { framed, .. } => SinkExt::<&str>::close(framed)
                .await
                .map_err(anyhow::Error::from),
            Self::WebSocket { stream, .. } => {
                stream.close(None).await.map_err(anyhow::Error::from)
            }
        };
        if let Err(e) = result {
            debug!(error = %e, "Transport close failed");
        }
    }
}

async fn read_websocket_frame(
    stream: &mut WebSocketStream<TcpStream>,
    limit: usize,
) -> Result<Option<String>, TransportReadError> {
    loop {
        match stream.next().await {
            Some(Ok(WsMessage::Text(text))) => {
                if text.len() > limit {
                    return Err(TransportReadError::LineTooLong { limit });
                }
                return Ok(Some(text.trim_end_matches(['\r', '\n']).to_string()));
            }
            Some(Ok(WsMessage::Close(_))) | None => return Ok(None),
            // tungstenite answers pings itself on the next read or write.
            Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_))) => continue,
            Some(Ok(WsMessage::Binary(_))) => {
                debug!("Ignoring binary WebSocket frame");
                continue;
            }
            Some(Err(e)) => return Err(e.into()),
        }
    }
}
