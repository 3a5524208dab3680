use std::sync::Arc;

use crate::{
    error::{FailureKind, Result, SttError},
    provider::SttProvider,
    retry::RetryPolicy,
    sleep::{Sleeper, TokioSleeper},
    types::{TranscriptionRequest, TranscriptionResult},
};

/// Transcription client that retries transient provider failures
///
/// Attempts run strictly one after another. The client carries no mutable
/// state, so clones can serve concurrent requests without coordination.
#[derive(Clone)]
pub struct TranscriptionClient {
    provider: Arc<dyn SttProvider>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

/// Result of a single provider call, classified for the retry loop
#[derive(Debug)]
pub(crate) enum AttemptOutcome {
    Success(String),
    Transient(SttError),
    Fatal(SttError),
}

impl From<Result<String>> for AttemptOutcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(transcript) => Self::Success(transcript),
            Err(error) => match error.kind() {
                FailureKind::Transient => Self::Transient(error),
                FailureKind::Fatal => Self::Fatal(error),
            },
        }
    }
}

#[derive(Debug)]
pub(crate) struct TranscriptionAttempt {
    pub number: u32,
    pub outcome: AttemptOutcome,
}

impl TranscriptionClient {
    pub fn new(provider: Arc<dyn SttProvider>, policy: RetryPolicy) -> Self {
        Self {
            provider,
            policy,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the timer used for backoff delays
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Transcribe audio, retrying transient failures with exponential backoff
    ///
    /// Returns the transcript of the first successful attempt. A fatal error
    /// is returned as-is without retrying. When every attempt fails
    /// transiently, returns [`SttError::TranscriptionFailed`] wrapping the
    /// last failure; no delay follows that final attempt.
    pub async fn transcribe(&self, request: &TranscriptionRequest) -> Result<TranscriptionResult> {
        if request.audio.is_empty() {
            return Err(SttError::InvalidRequest("audio payload is empty".to_string()));
        }

        let provider = self.provider.name();
        let max_attempts = self.policy.attempt_budget();

        let mut number = 1;

        loop {
            tracing::debug!(provider, attempt = number, max_attempts, "transcription attempt starting");

            let attempt = self.attempt(number, request).await;

            match attempt.outcome {
                AttemptOutcome::Success(transcript) => {
                    if attempt.number > 1 {
                        tracing::info!(provider, attempts = attempt.number, "transcription recovered after retry");
                    }

                    return Ok(TranscriptionResult {
                        transcript,
                        attempts_used: attempt.number,
                    });
                }
                AttemptOutcome::Fatal(error) => {
                    tracing::error!(provider, attempt = attempt.number, %error, "transcription failed, not retrying");
                    return Err(error);
                }
                AttemptOutcome::Transient(error) => {
                    log_transient(provider, attempt.number, max_attempts, &error);

                    if attempt.number >= max_attempts {
                        tracing::error!(provider, attempts = attempt.number, %error, "transcription retries exhausted");

                        return Err(SttError::TranscriptionFailed {
                            attempts: attempt.number,
                            source: Box::new(error),
                        });
                    }

                    let delay = self.policy.backoff(attempt.number);
                    tracing::debug!(provider, ?delay, "backing off before next attempt");
                    self.sleeper.sleep(delay).await;
                }
            }

            number += 1;
        }
    }

    async fn attempt(&self, number: u32, request: &TranscriptionRequest) -> TranscriptionAttempt {
        let timeout = self.policy.attempt_timeout;

        let result = tokio::time::timeout(timeout, self.provider.transcribe(request))
            .await
            .unwrap_or_else(|_| Err(SttError::Timeout(timeout)));

        TranscriptionAttempt {
            number,
            outcome: result.into(),
        }
    }
}

fn log_transient(provider: &str, attempt: u32, max_attempts: u32, error: &SttError) {
    match error {
        SttError::ProviderApiError { status, message } => {
            tracing::warn!(provider, attempt, max_attempts, status, %message, "provider reported an error");
        }
        _ => {
            tracing::warn!(provider, attempt, max_attempts, %error, "transcription request failed");
        }
    }
}
