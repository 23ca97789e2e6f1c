//! Logging setup utilities for the Boardcast services.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events are enabled by the default filter, besides the binary itself.
const DEFAULT_TARGETS: &[&str] = &["boardcast_server", "boardcast_shared", "tower_http"];

/// Build the default `EnvFilter` directive string.
///
/// Every crate in [`DEFAULT_TARGETS`] plus the binary is set to `default_log_level`.
pub fn default_directives(binary_name: &str, default_log_level: &str) -> String {
    DEFAULT_TARGETS
        .iter()
        .copied()
        .chain(std::iter::once(binary_name))
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "boardcast-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use boardcast_shared::logger::setup_logger;
///
/// setup_logger("boardcast-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
