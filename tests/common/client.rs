//! Test clients.
//!
//! `TestClient` speaks the newline protocol; `WsTestClient` speaks WebSocket.
//! Both expect a JSON-rendering listener unless a text helper says otherwise.

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A newline-protocol test client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: SocketAddr) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }

    /// Send one raw line.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one raw line, without its terminator.
    ///
    /// Fails if the server closed the connection.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive one JSON-rendered response.
    pub async fn recv(&mut self) -> anyhow::Result<Value> {
        let line = self.recv_line().await?;
        Ok(serde_json::from_str(&line)?)
    }

    /// Send a line and receive its JSON response.
    pub async fn request(&mut self, line: &str) -> anyhow::Result<Value> {
        self.send(line).await?;
        self.recv().await
    }

    /// Receive one text-rendered response, up to its last menu line.
    #[allow(dead_code)]
    pub async fn recv_text(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let line = self.recv_line().await?;
            let done = line.starts_with("Select [0]");
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Whether the server has closed the connection, waiting up to the timeout.
    #[allow(dead_code)]
    pub async fn is_closed(&mut self) -> bool {
        let mut line = String::new();
        matches!(
            timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await,
            Ok(Ok(0)) | Ok(Err(_))
        )
    }
}

/// A WebSocket test client.
#[allow(dead_code)]
pub struct WsTestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[allow(dead_code)]
impl WsTestClient {
    /// Connect, optionally sending an `Origin` header.
    pub async fn connect(url: &str, origin: Option<&str>) -> Result<Self, tokio_tungstenite::tungstenite::Error> {
        let mut request = url.into_client_request()?;
        if let Some(origin) = origin {
            let value = HeaderValue::from_str(origin)
                .map_err(|e| tokio_tungstenite::tungstenite::Error::HttpFormat(e.into()))?;
            request.headers_mut().insert("Origin", value);
        }
        let (stream, _) = connect_async(request).await?;
        Ok(Self { stream })
    }

    pub async fn send(&mut self, text: &str) -> anyhow::Result<()> {
        self.stream.send(WsMessage::Text(text.to_string())).await?;
        Ok(())
    }

    /// Receive the next text message.
    pub async fn recv_text(&mut self) -> anyhow::Result<String> {
        loop {
            match timeout(RECV_TIMEOUT, self.stream.next()).await? {
                Some(Ok(WsMessage::Text(text))) => return Ok(text),
                Some(Ok(WsMessage::Close(_))) | None => anyhow::bail!("connection closed"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Receive one JSON-rendered response.
    pub async fn recv(&mut self) -> anyhow::Result<Value> {
        Ok(serde_json::from_str(&self.recv_text().await?)?)
    }

    pub async fn request(&mut self, text: &str) -> anyhow::Result<Value> {
        self.send(text).await?;
        self.recv().await
    }

    pub async fn close(mut self) -> anyhow::Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
