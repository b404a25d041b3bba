//! chowd - conversational food-ordering daemon.

use chowd::config::{Config, validate};
use chowd::network::Gateway;
use chowd::state::Catalog;
use chowd::{Dispatcher, http, metrics};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(problems) = validate(&config) {
        for problem in &problems {
            error!(error = %problem, "Invalid configuration");
        }
        anyhow::bail!("{} configuration problem(s) in {config_path}", problems.len());
    }

    info!(server = %config.server.name, "Starting chowd");

    let catalog = Catalog::try_from(&config.catalog)?;
    info!(items = catalog.len(), "Catalog loaded");

    // metrics_port = 0 disables the HTTP endpoint, same as leaving it unset.
    match config.server.metrics_port {
        Some(port) if port != 0 => {
            metrics::init();
            tokio::spawn(http::run_http_server(port));
            info!(port, "Prometheus HTTP server started");
        }
        _ => info!("Metrics disabled"),
    }

    let dispatcher = Dispatcher::with_catalog(catalog);
    let gateway = Gateway::bind(&config, dispatcher).await?;

    tokio::select! {
        result = gateway.run() => result?,
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
            }
        }
    }

    info!("chowd stopped");
    Ok(())
}
