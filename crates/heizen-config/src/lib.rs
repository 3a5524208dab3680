#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod server;
pub mod stt;
pub mod telemetry;

use serde::Deserialize;

pub use health::*;
pub use server::*;
pub use stt::*;
pub use telemetry::{LogFormat, LogsConfig, TelemetryConfig};

/// Top-level Heizen configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Transcription providers and retry policy
    #[serde(default)]
    pub stt: SttConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
