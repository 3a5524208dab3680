//! Speech-to-text with bounded retries
//!
//! [`TranscriptionClient`] wraps a single [`SttProvider`] and masks transient
//! provider failures behind an exponential backoff [`RetryPolicy`]. The
//! [`Server`] routes HTTP transcription requests to one client per configured
//! provider.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod client;
mod error;
mod http_client;
mod provider;
mod request;
mod retry;
mod server;
mod sleep;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::DefaultBodyLimit, extract::State, routing::post};

pub use client::TranscriptionClient;
pub use error::{FailureKind, Result, SttError};
pub use provider::{SttProvider, deepgram::DeepgramProvider};
pub use request::ExtractMultipart;
pub use retry::RetryPolicy;
pub use server::{Server, SttServerBuilder};
pub use sleep::{Sleeper, TokioSleeper};
pub use types::{TranscriptionOptions, TranscriptionRequest, TranscriptionResponse, TranscriptionResult};

/// Build the STT server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &heizen_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        SttServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize STT server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for STT
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/v1/audio/transcriptions", post(transcribe))
        .layer(DefaultBodyLimit::max(request::BODY_LIMIT_BYTES))
}

/// Handle transcription requests
async fn transcribe(
    State(server): State<Arc<Server>>,
    ExtractMultipart(request): ExtractMultipart,
) -> Result<Json<TranscriptionResponse>> {
    tracing::debug!(
        bytes = request.audio.len(),
        model = ?request.options.model,
        "STT transcription handler called"
    );

    let result = server.transcribe(request).await?;

    tracing::debug!(attempts = result.attempts_used, "Transcription complete");

    Ok(Json(result.into()))
}
