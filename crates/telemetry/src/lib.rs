//! Tracing bootstrap shared by the Superstore binaries.

use anyhow::Context;
use superstore_kernel::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the log filter, preferring `RUST_LOG` over the configured default.
fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.log_filter)
            .with_context(|| format!("invalid log filter '{}'", settings.log_filter)),
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Returns `Ok(false)` when a subscriber was already installed.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<bool> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings)?)
        .with_writer(std::io::stderr);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    };

    tracing::debug!(
        target: "superstore-telemetry",
        format = ?settings.log_format,
        installed,
        "telemetry initialized"
    );

    Ok(installed)
}
