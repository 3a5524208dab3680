use std::time::Duration;

use async_trait::async_trait;

/// Asynchronous delay used between retry attempts
///
/// The backoff wait is the only suspension point in the retry loop besides
/// the provider call itself. Dropping the future cancels the wait.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
