//! Test server management.
//!
//! Runs a chowd gateway inside the test's runtime, bound to ephemeral ports.

use chowd::Dispatcher;
use chowd::config::{Config, validate};
use chowd::network::Gateway;
use chowd::state::Catalog;
use std::io::Write;
use std::net::SocketAddr;
use tempfile::NamedTempFile;
use tokio::task::JoinHandle;

/// A test server instance. The gateway task is aborted on drop.
pub struct TestServer {
    addr: SocketAddr,
    ws_addr: Option<SocketAddr>,
    dispatcher: Dispatcher,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a server whose line listener renders JSON.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with("json", "").await
    }

    /// Spawn a server with the given line-listener renderer and extra TOML
    /// sections (`[websocket]`, `[limits]`, `[[catalog.items]]`).
    pub async fn spawn_with(render: &str, extra: &str) -> anyhow::Result<Self> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"
[server]
name = "test.chowd"

[listen]
address = "127.0.0.1:0"
render = "{render}"

{extra}
"#
        )?;

        let config = Config::load(file.path())?;
        if let Err(problems) = validate(&config) {
            anyhow::bail!("invalid test config: {problems:?}");
        }

        let dispatcher = Dispatcher::with_catalog(Catalog::try_from(&config.catalog)?);
        let gateway = Gateway::bind(&config, dispatcher.clone()).await?;
        let addr = gateway.local_addr()?;
        let ws_addr = gateway.websocket_addr();

        let task = tokio::spawn(async move {
            let _ = gateway.run().await;
        });

        Ok(Self {
            addr,
            ws_addr,
            dispatcher,
            task,
        })
    }

    /// Plaintext listener address.
    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    /// WebSocket URL, if the server has a WebSocket listener.
    #[allow(dead_code)]
    pub fn ws_url(&self) -> Option<String> {
        self.ws_addr.map(|addr| format!("ws://{addr}/"))
    }

    /// WebSocket listener address, if any.
    #[allow(dead_code)]
    pub fn ws_address(&self) -> Option<SocketAddr> {
        self.ws_addr
    }

    /// The server's dispatcher, for inspecting the session store.
    #[allow(dead_code)]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Create a new line client connected to this server.
    pub async fn connect(&self) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(self.addr).await
    }

    /// Wait until the store holds `count` sessions, up to two seconds.
    #[allow(dead_code)]
    pub async fn wait_for_sessions(&self, count: usize) -> anyhow::Result<()> {
        for _ in 0..40 {
            if self.dispatcher.store().len() == count {
                return Ok(());
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
        anyhow::bail!(
            "expected {count} sessions, found {}",
            self.dispatcher.store().len()
        )
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
