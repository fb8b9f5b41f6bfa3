//! Stderr diagnostics for the column order tools.
//!
//! Filtered by `RUST_LOG`; command output on stdout never goes through
//! tracing.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set and parseable; otherwise `default_filter` is
/// used. Fails if a subscriber is already installed.
///
/// # Example
/// ```bash
/// RUST_LOG=columnsortorder::manager=debug columnsortorder disable qbank_tags
/// ```
pub fn init(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("invalid log filter '{}'", default_filter))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("install tracing subscriber")
}
