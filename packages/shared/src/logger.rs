//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` when set; otherwise the given
/// binary name (with `-` normalized to `_`) is used as the default target
/// at `default_level`, with `tower_http` kept at debug for request traces.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let target = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{target}={default_level},tower_http=debug"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    tracing::debug!("Logger initialized for '{}'", bin_name);
}
