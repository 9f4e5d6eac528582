//! Best-time server for PAIR-A-DOX game sessions.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use log::info;
use pd_server::{
    api,
    config::ServerConfig,
    logging, metrics,
    store::BestTimeStore,
};
use pico_args::Arguments;

const HELP: &str = "\
Run the PAIR-A-DOX best-time server

USAGE:
  pd_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT  Server socket bind address   [default: env SERVER_BIND or 127.0.0.1:3000]
  --metrics-bind  IP:PORT  Prometheus scrape address    [default: env METRICS_BIND, disabled if unset]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:3000)
  METRICS_BIND             Prometheus exporter address (e.g., 0.0.0.0:9090)
  INITIAL_BEST_TIME        Record to start with, in seconds
  RUST_LOG                 Log filter (e.g., info,pd_server=debug)
";

struct Args {
    bind: Option<SocketAddr>,
    metrics_bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        metrics_bind: pargs.opt_value_from_str("--metrics-bind")?,
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.metrics_bind)?;
    info!("Starting best-time server at {}", config.bind);

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics available at http://{}/metrics", addr);
    }

    let store = match config.initial_best_time {
        Some(time) => {
            info!("Seeding best time with {}s", time);
            metrics::best_time_seconds(time);
            BestTimeStore::with_record(time)
        }
        None => BestTimeStore::new(),
    };

    let app = api::create_router(api::AppState {
        store: Arc::new(store),
    });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
