//! Logging for Heizen
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a fmt
//! layer in either text or JSON form

use heizen_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber from configuration
///
/// `default_filter` is used when the config carries no filter and
/// `RUST_LOG` is unset. An unparsable filter falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<()> {
    let filter = build_filter(config, default_filter);
    let format = config.map_or(LogFormat::Text, |c| c.logs.format);

    tracing_subscriber::registry()
        .with(fmt_layer(format))
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    if let Some(config) = config {
        tracing::debug!(service = %config.service_name, ?format, "telemetry initialized");
    }

    Ok(())
}

fn build_filter(config: Option<&TelemetryConfig>, default_filter: &str) -> EnvFilter {
    let configured = config.and_then(|c| c.logs.filter.as_deref());

    match configured {
        Some(directive) => EnvFilter::try_new(directive),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter)),
    }
    .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn fmt_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().flatten_event(true).boxed(),
    }
}
