use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text already in memory
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        tracing::debug!(providers = config.stt.providers.len(), "configuration loaded");

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no provider is configured, a provider lacks
    /// credentials, or the retry policy is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_providers()?;
        self.validate_retry()?;
        Ok(())
    }

    fn validate_providers(&self) -> anyhow::Result<()> {
        if self.stt.providers.is_empty() {
            anyhow::bail!("at least one STT provider must be configured under [stt.providers]");
        }

        for (name, provider) in &self.stt.providers {
            if name.contains('/') {
                anyhow::bail!("STT provider name '{name}' must not contain '/'");
            }

            match provider.api_key {
                Some(ref key) if !key.expose_secret().is_empty() => {}
                _ => anyhow::bail!("STT provider '{name}' requires a non-empty api_key"),
            }
        }

        Ok(())
    }

    fn validate_retry(&self) -> anyhow::Result<()> {
        let retry = &self.stt.retry;

        if retry.max_attempts == 0 {
            anyhow::bail!("stt.retry.max_attempts must be at least 1");
        }

        if retry.base_delay > retry.max_delay {
            anyhow::bail!("stt.retry.base_delay must not exceed stt.retry.max_delay");
        }

        if retry.attempt_timeout.is_zero() {
            anyhow::bail!("stt.retry.attempt_timeout must be greater than 0");
        }

        Ok(())
    }
}
