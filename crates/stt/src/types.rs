use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Audio plus provider options for one transcription
///
/// The client borrows the request for every attempt, so retries resend the
/// same buffer without copying it.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// Raw audio data
    pub audio: Bytes,
    /// Provider options, passed through untouched by the retry loop
    pub options: TranscriptionOptions,
}

impl TranscriptionRequest {
    pub fn new(audio: impl Into<Bytes>, options: TranscriptionOptions) -> Self {
        Self {
            audio: audio.into(),
            options,
        }
    }
}

/// Provider-specific transcription settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOptions {
    /// Model identifier (e.g. "nova-2"); the provider default applies when unset
    pub model: Option<String>,
    /// Optional language hint (BCP-47)
    pub language: Option<String>,
    /// Add punctuation and capitalization
    pub punctuate: bool,
    /// Split the transcript into paragraphs
    pub paragraphs: bool,
    /// Format numbers, dates and similar entities
    pub smart_format: bool,
    /// Label speakers
    pub diarize: bool,
    /// Content type of the audio payload
    pub content_type: String,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            model: None,
            language: None,
            punctuate: true,
            paragraphs: true,
            smart_format: false,
            diarize: false,
            content_type: "audio/wav".to_string(),
        }
    }
}

/// Successful transcription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionResult {
    pub transcript: String,
    /// Number of provider calls it took, at least 1
    pub attempts_used: u32,
}

/// Response body of the transcription endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// Transcribed text
    pub text: String,
    /// Provider calls made for this request
    pub attempts: u32,
}

impl From<TranscriptionResult> for TranscriptionResponse {
    fn from(result: TranscriptionResult) -> Self {
        Self {
            text: result.transcript,
            attempts: result.attempts_used,
        }
    }
}
