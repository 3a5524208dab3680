use std::sync::Arc;

use heizen_config::{SttProviderConfig, SttProviderType};
use secrecy::SecretString;

use crate::{
    client::TranscriptionClient,
    error::SttError,
    provider::{SttProvider, deepgram::DeepgramProvider},
    retry::RetryPolicy,
    types::{TranscriptionRequest, TranscriptionResult},
};

/// STT server that routes requests to the appropriate provider
pub struct Server {
    clients: Vec<TranscriptionClient>,
}

impl Server {
    /// Build a server from ready-made clients, in routing order
    pub const fn from_clients(clients: Vec<TranscriptionClient>) -> Self {
        Self { clients }
    }

    /// Transcribe audio using the appropriate provider
    ///
    /// Routes on the model in the request. Model format: "provider/model"
    /// (e.g. "deepgram/nova-2"). Without a known provider prefix the first
    /// configured provider is used and the model is passed through as-is.
    pub async fn transcribe(&self, mut request: TranscriptionRequest) -> crate::error::Result<TranscriptionResult> {
        let client = self.route(&mut request.options.model)?;

        tracing::debug!(
            provider = client.provider_name(),
            model = ?request.options.model,
            "routing transcription request"
        );

        client.transcribe(&request).await
    }

    /// Pick a client and strip the provider prefix from `model`
    fn route(&self, model: &mut Option<String>) -> crate::error::Result<&TranscriptionClient> {
        let prefixed = model.as_deref().and_then(|m| m.split_once('/'));

        if let Some((provider_name, model_name)) = prefixed {
            let client = self
                .clients
                .iter()
                .find(|c| c.provider_name() == provider_name)
                .ok_or_else(|| SttError::ProviderNotFound(provider_name.to_string()))?;

            *model = Some(model_name.to_string()).filter(|m| !m.is_empty());
            return Ok(client);
        }

        self.clients
            .first()
            .ok_or_else(|| SttError::ProviderNotFound("No STT providers configured".to_string()))
    }
}

/// Builder for constructing the STT server from configuration
pub struct SttServerBuilder<'a> {
    config: &'a heizen_config::Config,
}

impl<'a> SttServerBuilder<'a> {
    pub const fn new(config: &'a heizen_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let policy = RetryPolicy::from(&self.config.stt.retry);
        let mut clients = Vec::new();

        for (name, provider_config) in &self.config.stt.providers {
            tracing::debug!("Initializing STT provider: {name}");

            let provider: Arc<dyn SttProvider> = match provider_config.provider_type {
                SttProviderType::Deepgram => Arc::new(DeepgramProvider::new(
                    name.clone(),
                    resolve_api_key(name, provider_config)?,
                    provider_config.base_url.clone(),
                    provider_config.model.clone(),
                )?),
            };

            clients.push(TranscriptionClient::new(provider, policy.clone()));
        }

        if clients.is_empty() {
            tracing::debug!("No STT providers configured");
        } else {
            tracing::debug!(
                max_attempts = policy.attempt_budget(),
                "STT server initialized with {} provider(s)",
                clients.len()
            );
        }

        Ok(Server::from_clients(clients))
    }
}

fn resolve_api_key(name: &str, config: &SttProviderConfig) -> crate::error::Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| SttError::ConfigError(format!("API key required for STT provider '{name}'")))
}
