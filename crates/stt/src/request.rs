use axum::extract::{FromRequest, Multipart, Request, multipart::MultipartError};
use http::StatusCode;

use crate::{
    error::SttError,
    types::{TranscriptionOptions, TranscriptionRequest},
};

/// Body limit for audio uploads (32 MiB)
pub(crate) const BODY_LIMIT_BYTES: usize = 32 << 20;

/// Extractor for multipart form data containing an audio file
///
/// The `model` field is kept verbatim in `options.model`, including any
/// `provider/` prefix; the server strips the prefix when routing.
pub struct ExtractMultipart(pub TranscriptionRequest);

fn invalid(message: impl Into<String>) -> SttError {
    SttError::InvalidRequest(message.into())
}

/// Length-limit failures surface while streaming fields, so every read goes through here
fn read_error(context: &str, error: &MultipartError) -> SttError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        SttError::PayloadTooLarge(format!("audio upload exceeds {} MiB", BODY_LIMIT_BYTES >> 20))
    } else {
        invalid(format!("{context}: {error}"))
    }
}

fn parse_flag(field: &str, value: &str) -> Result<bool, SttError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(invalid(format!("Invalid {field} value '{other}', expected true or false"))),
    }
}

impl<S> FromRequest<S> for ExtractMultipart
where
    S: Send + Sync,
{
    type Rejection = SttError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            return Err(invalid("Expected 'Content-Type: multipart/form-data'"));
        }

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| invalid(format!("Failed to parse multipart form: {e}")))?;

        let mut audio = None;
        let mut options = TranscriptionOptions::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| read_error("Failed to read multipart form", &e))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "file" {
                if let Some(ct) = field.content_type() {
                    options.content_type = ct.to_string();
                }
                audio = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| read_error("Failed to read audio data", &e))?,
                );
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| read_error(&format!("Failed to read {name} field"), &e))?;

            match name.as_str() {
                "model" if !value.trim().is_empty() => options.model = Some(value.trim().to_string()),
                "language" if !value.trim().is_empty() => options.language = Some(value.trim().to_string()),
                "smart_format" => options.smart_format = parse_flag(&name, &value)?,
                "diarize" => options.diarize = parse_flag(&name, &value)?,
                _ => {
                    // Skip unknown and empty fields
                }
            }
        }

        let audio = audio.ok_or_else(|| invalid("Missing required 'file' field in multipart form"))?;

        Ok(Self(TranscriptionRequest { audio, options }))
    }
}
