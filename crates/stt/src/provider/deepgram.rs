use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{error::SttError, http_client::http_client, types::TranscriptionRequest};

use super::SttProvider;

const DEFAULT_DEEPGRAM_API_URL: &str = "https://api.deepgram.com/v1";

/// Deepgram prerecorded-audio provider
pub struct DeepgramProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    default_model: Option<String>,
    name: String,
}

impl DeepgramProvider {
    pub fn new(
        name: String,
        api_key: SecretString,
        base_url: Option<String>,
        default_model: Option<String>,
    ) -> crate::error::Result<Self> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_DEEPGRAM_API_URL.to_string());

        Ok(Self {
            client: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            default_model,
            name,
        })
    }

    fn query(&self, request: &TranscriptionRequest) -> Vec<(&'static str, String)> {
        let options = &request.options;

        let mut query = vec![
            ("punctuate", options.punctuate.to_string()),
            ("paragraphs", options.paragraphs.to_string()),
        ];

        if let Some(model) = options.model.as_ref().or(self.default_model.as_ref()) {
            query.push(("model", model.clone()));
        }
        if let Some(language) = &options.language {
            query.push(("language", language.clone()));
        }
        if options.smart_format {
            query.push(("smart_format", "true".to_string()));
        }
        if options.diarize {
            query.push(("diarize", "true".to_string()));
        }

        query
    }
}

/// Success body, or an error body that still came back with a 2xx status
#[derive(Debug, Deserialize)]
struct DeepgramResponse {
    #[serde(default)]
    results: Option<DeepgramResults>,
    #[serde(default)]
    err_code: Option<String>,
    #[serde(default)]
    err_msg: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DeepgramResults {
    #[serde(default)]
    channels: Vec<DeepgramChannel>,
}

#[derive(Debug, Deserialize)]
struct DeepgramChannel {
    #[serde(default)]
    alternatives: Vec<DeepgramAlternative>,
}

#[derive(Debug, Deserialize)]
struct DeepgramAlternative {
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    paragraphs: Option<DeepgramParagraphs>,
}

#[derive(Debug, Deserialize)]
struct DeepgramParagraphs {
    #[serde(default)]
    transcript: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeepgramErrorBody {
    #[serde(default)]
    err_msg: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// `error` is usually a string but some gateways send an object
fn error_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

/// `results.channels[0].alternatives[0].paragraphs.transcript`, or the flat
/// `transcript` when paragraphs were not requested
fn extract_transcript(results: Option<DeepgramResults>, paragraphs: bool) -> Option<String> {
    let alternative = results?.channels.into_iter().next()?.alternatives.into_iter().next()?;

    if paragraphs {
        alternative.paragraphs?.transcript
    } else {
        alternative.transcript
    }
}

/// Classify a 2xx body: an `err_msg` or `error` field is a provider-reported
/// error, anything else must carry the transcript
fn read_success_body(status: u16, body: &[u8], paragraphs: bool) -> crate::error::Result<String> {
    let parsed: DeepgramResponse = serde_json::from_slice(body)
        .map_err(|e| SttError::UnexpectedResponse(format!("Deepgram response is not valid JSON: {e}")))?;

    if let Some(message) = parsed.err_msg.or_else(|| parsed.error.map(error_text)) {
        let code = parsed.err_code.unwrap_or_default();
        return Err(SttError::ProviderApiError {
            status,
            message: if code.is_empty() { message } else { format!("{code}: {message}") },
        });
    }

    extract_transcript(parsed.results, paragraphs)
        .ok_or_else(|| SttError::UnexpectedResponse("no transcript at results.channels[0].alternatives[0]".to_string()))
}

fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<DeepgramErrorBody>(body)
        .ok()
        .and_then(|b| b.err_msg.or_else(|| b.error.map(error_text)))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}

#[async_trait]
impl SttProvider for DeepgramProvider {
    async fn transcribe(&self, request: &TranscriptionRequest) -> crate::error::Result<String> {
        let url = format!("{}/listen", self.base_url);

        tracing::debug!(
            provider = %self.name,
            bytes = request.audio.len(),
            model = ?request.options.model.as_ref().or(self.default_model.as_ref()),
            "Deepgram transcription request",
        );

        let response = self
            .client
            .post(&url)
            .query(&self.query(request))
            .header("Authorization", format!("Token {}", self.api_key.expose_secret()))
            .header("Content-Type", &request.options.content_type)
            .body(request.audio.clone())
            .send()
            .await
            .map_err(|e| SttError::ConnectionError(format!("Failed to send request to Deepgram: {e}")))?;

        let status = response.status();

        let body = response
            .bytes()
            .await
            .map_err(|e| SttError::ConnectionError(format!("Failed to read Deepgram response: {e}")))?;

        if !status.is_success() {
            return Err(SttError::ProviderApiError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let transcript = read_success_body(status.as_u16(), &body, request.options.paragraphs)?;

        tracing::debug!(provider = %self.name, chars = transcript.len(), "Deepgram transcription complete");

        Ok(transcript)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
