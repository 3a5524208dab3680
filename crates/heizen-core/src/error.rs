use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The feature crate turns
/// the error into an axum response through [`ErrorBody`], keeping the wire
/// format identical across endpoints.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// Error response envelope: `{"error": {"message", "type", "code"}}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub message: String,
    pub r#type: String,
    pub code: u16,
}

impl ErrorBody {
    /// Build the envelope for any [`HttpError`]
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            error: ErrorDetails {
                message: error.client_message(),
                r#type: error.error_type().to_owned(),
                code: error.status_code().as_u16(),
            },
        }
    }
}
