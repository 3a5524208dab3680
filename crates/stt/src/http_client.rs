use std::time::Duration;

use reqwest::Client;

use crate::error::SttError;

/// Build the connection pool owned by one provider instance
///
/// No overall request timeout is set here: each attempt is bounded by the
/// retry policy's `attempt_timeout` instead.
pub(crate) fn http_client() -> crate::error::Result<Client> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
        .map_err(|e| SttError::ConfigError(format!("Failed to build HTTP client: {e}")))
}
