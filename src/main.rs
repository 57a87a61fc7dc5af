//! GHN forwarding proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client POST {url, data, headers}
//!     ──────────────────────────────▶ ┌──────────────────────────────┐
//!                                      │ http::server                 │
//!                                      │  CORS · request ID · trace   │
//!                                      │  method gate                 │
//!                                      │        │                     │
//!                                      │        ▼                     │
//!                                      │ http::request (fields)       │
//!                                      │        │                     │
//!                                      │        ▼                     │
//!                                      │ security::allowlist          │
//!                                      │        │                     │
//!                                      │        ▼                     │         ┌────────┐
//!                                      │ upstream::client ────────────┼────────▶│ target │
//!                                      │        │  (30 s, no retry)   │◀────────│  API   │
//!                                      │        ▼                     │         └────────┘
//!     ◀────────────────────────────── │ http::response (envelope)    │
//!     {code, message, data, meta}      └──────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use ghn_proxy::http::HttpServer;
use ghn_proxy::lifecycle::{signals, startup, Shutdown};
use ghn_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "ghn-proxy")]
#[command(about = "Forwards JSON POST requests to allowlisted GHN gateways", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::resolve_config(cli.config.as_deref(), cli.bind)?;
    logging::init_tracing(&config.observability.log_level);

    tracing::info!("ghn-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        timeout_secs = config.upstream.timeout_secs,
        allowed_domains = ?config.policy.allowed_domains,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(&shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
