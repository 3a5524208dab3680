//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, time::Duration};

use heizen_config::{
    Config, HealthConfig, RetryConfig, ServerConfig, SttConfig, SttProviderConfig, SttProviderType,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults and a fast retry schedule
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                stt: SttConfig {
                    providers: indexmap::IndexMap::new(),
                    retry: RetryConfig {
                        max_attempts: 3,
                        base_delay: Duration::from_millis(10),
                        max_delay: Duration::from_millis(40),
                        attempt_timeout: Duration::from_secs(5),
                    },
                },
                telemetry: None,
            },
        }
    }

    /// Add a Deepgram provider pointed at a mock backend
    pub fn with_deepgram_provider(mut self, name: &str, base_url: &str) -> Self {
        self.config.stt.providers.insert(
            name.to_owned(),
            SttProviderConfig {
                provider_type: SttProviderType::Deepgram,
                api_key: Some(SecretString::from("test-key")),
                base_url: Some(base_url.to_owned()),
                model: Some("nova-2".to_owned()),
            },
        );
        self
    }

    /// Set the attempt budget
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.stt.retry.max_attempts = max_attempts;
        self
    }

    /// Set the per-attempt deadline
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.config.stt.retry.attempt_timeout = timeout;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
