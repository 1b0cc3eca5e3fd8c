//! sirup: host-based reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ net::listener ──▶ http::server ──▶ forwarded headers
//!                                                            │
//!                                                            ▼
//!                                                     host normalization
//!                                                            │
//!                                                            ▼
//!                                    ┌──────── routing (Host → target) ────────┐
//!                                    ▼                                         ▼
//!     Client Response          http::forward ◀──── stream ────▶ Backend    unmapped (404)
//!     ◀──────────────────────────────┘
//! ```
//!
//! Stop with SIGINT/SIGTERM: accepting stops at once and in-flight requests
//! get `SHUTDOWN_GRACE` to finish.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use sirup::config::load_config;
use sirup::lifecycle::{stop_signal, SHUTDOWN_GRACE};
use sirup::observability::init_logging;
use sirup::{net, HttpServer, RouteTable};

#[derive(Parser)]
#[command(name = "sirup")]
#[command(about = "Reverse proxy routing requests to backends by host name", long_about = None)]
struct Cli {
    /// The port to listen on for incoming requests to proxy.
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// The path to the mapping config file.
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    tracing::info!("sirup v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli.config).inspect_err(|e| {
        tracing::error!(path = %cli.config.display(), error = %e, "Failed to read config file");
    })?;
    let routes = RouteTable::from_config(&config);

    let listener = net::bind_port(cli.port).await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to listen");
    })?;
    let mut server = HttpServer::new(listener, routes).start()?;

    tokio::select! {
        result = stop_signal() => result?,
        err = server.closed() => {
            tracing::error!(error = %err, "Server stopped unexpectedly");
            return Err(err.into());
        }
    }

    server.shutdown(SHUTDOWN_GRACE).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
