//! Structured logging configuration.
//!
//! Library crates log through the `log` facade; the subscriber installed
//! here forwards those records into `tracing` as well.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,tower_http=warn";

/// Initialize structured logging
///
/// Log levels are read from the `RUST_LOG` env var.
///
/// # Example
///
/// ```no_run
/// use pd_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a change of record holder
pub fn log_new_record(previous: Option<u32>, time: u32) {
    match previous {
        Some(previous) => tracing::info!(
            previous_seconds = previous,
            record_seconds = time,
            "New best time"
        ),
        None => tracing::info!(record_seconds = time, "First best time recorded"),
    }
}
