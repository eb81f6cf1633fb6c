//! CORS forwarding proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                  CORS PROXY                    │
//!   GET /api/proxy       │                                               │
//!     ?url=<target>      │  ┌────────┐   ┌───────────┐   ┌───────────┐   │
//!   ─────────────────────┼─▶│ server │──▶│  request  │──▶│ forwarder │───┼──▶ Target
//!                        │  └───┬────┘   │ normalize │   └─────┬─────┘   │
//!                        │      │        │ + filter  │         │         │
//!                        │      │        └───────────┘         ▼         │
//!   OPTIONS (preflight)  │      │                        ┌───────────┐   │
//!   ◀────────────────────┼──────┘                        │ response  │◀──┼─── Target
//!                        │                               │ filter +  │   │
//!   Forwarded response   │                               │   CORS    │   │
//!   ◀────────────────────┼───────────────────────────────┴───────────┘   │
//!                        └───────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cors_proxy::config::load_or_default;
use cors_proxy::http::HttpServer;
use cors_proxy::lifecycle::{signals, Shutdown};
use cors_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "cors-proxy")]
#[command(about = "Forward requests to any URL and attach CORS headers", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("cors-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        endpoint = %config.endpoint.path,
        connect_timeout_secs = config.upstream.connect_timeout_secs,
        response_timeout_secs = ?config.upstream.response_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, shutdown)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
