pub(crate) mod deepgram;

use async_trait::async_trait;

use crate::types::TranscriptionRequest;

/// One outbound "transcribe prerecorded audio" call
///
/// Implementations make exactly one request per invocation and leave
/// retrying to [`crate::TranscriptionClient`]. Errors must be classified
/// through [`crate::SttError`] variants so the client can tell transient
/// failures from fatal ones.
#[async_trait]
pub trait SttProvider: Send + Sync {
    /// Transcribe audio to text
    async fn transcribe(&self, request: &TranscriptionRequest) -> crate::error::Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
