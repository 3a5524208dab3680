use std::time::Duration;

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Top-level STT configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// STT provider configurations keyed by name
    #[serde(default)]
    pub providers: IndexMap<String, SttProviderConfig>,
    /// Retry policy shared by every provider
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Configuration for a single STT provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: SttProviderType,
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model used when the request does not name one
    #[serde(default)]
    pub model: Option<String>,
}

/// Supported STT providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SttProviderType {
    /// Deepgram prerecorded transcription
    Deepgram,
}

/// Attempt budget and backoff schedule for transcription requests
///
/// The delay before attempt `n + 1` is `min(base_delay * 2^(n-1), max_delay)`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the second attempt
    #[serde(default = "default_base_delay", deserialize_with = "deserialize_duration")]
    pub base_delay: Duration,
    /// Upper bound for any single delay
    #[serde(default = "default_max_delay", deserialize_with = "deserialize_duration")]
    pub max_delay: Duration,
    /// Deadline for one provider call
    #[serde(default = "default_attempt_timeout", deserialize_with = "deserialize_duration")]
    pub attempt_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay: default_base_delay(),
            max_delay: default_max_delay(),
            attempt_timeout: default_attempt_timeout(),
        }
    }
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay() -> Duration {
    Duration::from_secs(1)
}

const fn default_max_delay() -> Duration {
    Duration::from_secs(8)
}

const fn default_attempt_timeout() -> Duration {
    Duration::from_secs(60)
}

/// Accepts human-readable durations such as `"500ms"`, `"2s"` or `"1m"`
fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}
