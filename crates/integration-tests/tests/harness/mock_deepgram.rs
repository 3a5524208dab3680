//! Mock Deepgram backend for integration tests
//!
//! Serves `POST /v1/listen` with canned prerecorded-transcription responses

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use bytes::Bytes;
use tokio_util::sync::CancellationToken;

/// What the mock answers once its scripted failures are used up
#[derive(Debug, Clone)]
pub enum Behavior {
    /// 200 with the transcript at the paragraph path
    Transcript(String),
    /// 200 with a body that has no `results` section
    MissingTranscript,
    /// 200 whose body carries an `err_msg` instead of results
    ErrorBody,
    /// 200 whose body carries a bare `error` field instead of results
    ErrorField(String),
    /// 200 with a body that is not JSON
    Malformed,
    /// Sleep before answering with a transcript
    Slow(Duration),
}

/// Details of the most recent request the mock received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body_len: usize,
}

/// Mock Deepgram backend that returns predictable responses
pub struct MockDeepgram {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    request_count: AtomicU32,
    /// Number of requests to fail with 503 before applying `behavior`
    fail_count: u32,
    behavior: Behavior,
    last_request: Mutex<Option<RecordedRequest>>,
}

impl MockDeepgram {
    /// Start a mock that always transcribes successfully
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0, Behavior::Transcript("Hello from mock Deepgram.".to_owned())).await
    }

    /// Start a mock that fails the first `n` requests with 503
    pub async fn start_failing(n: u32) -> anyhow::Result<Self> {
        Self::start_inner(n, Behavior::Transcript("Hello from mock Deepgram.".to_owned())).await
    }

    /// Start a mock with a specific steady-state behavior
    pub async fn start_with(behavior: Behavior) -> anyhow::Result<Self> {
        Self::start_inner(0, behavior).await
    }

    async fn start_inner(fail_count: u32, behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            request_count: AtomicU32::new(0),
            fail_count,
            behavior,
            last_request: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/listen", routing::post(handle_listen))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as a provider
    ///
    /// Includes `/v1` since the Deepgram provider appends `/listen`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of transcription requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::SeqCst)
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.last_request.lock().unwrap().clone()
    }
}

impl Drop for MockDeepgram {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn success_body(transcript: &str) -> serde_json::Value {
    serde_json::json!({
        "metadata": { "request_id": "mock-request", "channels": 1 },
        "results": {
            "channels": [{
                "alternatives": [{
                    "transcript": transcript.to_lowercase(),
                    "confidence": 0.99,
                    "paragraphs": {
                        "transcript": transcript,
                        "paragraphs": []
                    }
                }]
            }]
        }
    })
}

async fn handle_listen(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let n = state.request_count.fetch_add(1, Ordering::SeqCst) + 1;

    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);

    *state.last_request.lock().unwrap() = Some(RecordedRequest {
        query,
        authorization: header("authorization"),
        content_type: header("content-type"),
        body_len: body.len(),
    });

    if n <= state.fail_count {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "err_code": "SERVICE_UNAVAILABLE",
                "err_msg": format!("Mock overload on request {n}"),
                "request_id": "mock-request"
            })),
        )
            .into_response();
    }

    match &state.behavior {
        Behavior::Transcript(text) => Json(success_body(text)).into_response(),
        Behavior::Slow(delay) => {
            tokio::time::sleep(*delay).await;
            Json(success_body("Eventually.")).into_response()
        }
        Behavior::MissingTranscript => Json(serde_json::json!({
            "metadata": { "request_id": "mock-request" }
        }))
        .into_response(),
        Behavior::ErrorBody => Json(serde_json::json!({
            "err_code": "INSUFFICIENT_PERMISSIONS",
            "err_msg": "Project key cannot transcribe"
        }))
        .into_response(),
        Behavior::ErrorField(message) => Json(serde_json::json!({ "error": message })).into_response(),
        Behavior::Malformed => (StatusCode::OK, "<html>gateway</html>").into_response(),
    }
}
