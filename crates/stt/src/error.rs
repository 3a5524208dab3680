use std::time::Duration;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use heizen_core::{ErrorBody, HttpError};
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Whether retrying the same request can change the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network blip, provider overload, or an error the provider reported
    Transient,
    /// Malformed response, invalid input, or misconfiguration
    Fatal,
}

/// STT service errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum SttError {
    /// Invalid request parameters or payload
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upload exceeded the request body limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Provider not found in configuration
    #[error("Provider '{0}' not found")]
    ProviderNotFound(String),

    /// Provider answered with an error instead of a transcript
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A single provider call exceeded its deadline
    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),

    /// Provider answered successfully but the transcript was not where expected
    #[error("Unexpected provider response: {0}")]
    UnexpectedResponse(String),

    /// Every attempt in the budget failed; `source` is the last failure
    #[error("Transcription failed after {attempts} attempt(s): {source}")]
    TranscriptionFailed { attempts: u32, source: Box<SttError> },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SttError {
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::ProviderApiError { .. } | Self::ConnectionError(_) | Self::Timeout(_) => FailureKind::Transient,
            Self::InvalidRequest(_)
            | Self::PayloadTooLarge(_)
            | Self::ProviderNotFound(_)
            | Self::UnexpectedResponse(_)
            | Self::TranscriptionFailed { .. }
            | Self::ConfigError(_) => FailureKind::Fatal,
        }
    }

    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind(), FailureKind::Transient)
    }
}

impl HttpError for SttError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ProviderNotFound(_) => StatusCode::NOT_FOUND,
            Self::ProviderApiError { .. } | Self::ConnectionError(_) | Self::UnexpectedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::TranscriptionFailed { source, .. } => source.status_code(),
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) | Self::PayloadTooLarge(_) => "invalid_request_error",
            Self::ProviderNotFound(_) => "not_found_error",
            Self::ProviderApiError { .. }
            | Self::ConnectionError(_)
            | Self::UnexpectedResponse(_)
            | Self::TranscriptionFailed { .. } => "api_error",
            Self::Timeout(_) => "timeout_error",
            Self::ConfigError(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::ConfigError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for SttError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
