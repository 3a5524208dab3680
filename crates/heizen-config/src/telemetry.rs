use serde::Deserialize;

/// Telemetry configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Log output configuration
    #[serde(default)]
    pub logs: LogsConfig,
}

/// Logs configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogsConfig {
    /// Output format of the fmt layer
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directive, e.g. `info,stt=debug`
    #[serde(default)]
    pub filter: Option<String>,
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

fn default_service_name() -> String {
    "heizen".to_string()
}
