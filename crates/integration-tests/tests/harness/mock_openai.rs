//! Mock OpenAI backend for integration tests
//!
//! Implements the two upstream endpoints the gateway calls and returns
//! canned responses, recording enough of each request to assert on.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Mock upstream that returns predictable responses
pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    transcription_count: AtomicU32,
    completion_count: AtomicU32,
    /// When set, every request fails with this status and body
    failure: Option<(u16, String)>,
    transcript: String,
    completion: String,
    last_authorization: Mutex<Option<String>>,
    last_messages: Mutex<Vec<(String, String)>>,
    last_model: Mutex<Option<String>>,
}

impl MockOpenAi {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None, "hallazgos dictados", "plantilla completada").await
    }

    /// Start a mock server that fails every request with `status` and `body`
    pub async fn start_failing(status: u16, body: &str) -> anyhow::Result<Self> {
        Self::start_inner(Some((status, body.to_owned())), "", "").await
    }

    /// Start a mock server with custom transcript and completion text
    pub async fn start_with(transcript: &str, completion: &str) -> anyhow::Result<Self> {
        Self::start_inner(None, transcript, completion).await
    }

    async fn start_inner(failure: Option<(u16, String)>, transcript: &str, completion: &str) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            transcription_count: AtomicU32::new(0),
            completion_count: AtomicU32::new(0),
            failure,
            transcript: transcript.to_owned(),
            completion: completion.to_owned(),
            last_authorization: Mutex::new(None),
            last_messages: Mutex::new(Vec::new()),
            last_model: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcriptions))
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
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

    /// Base URL for configuring the mock as the upstream
    ///
    /// Includes `/v1` since the providers append paths like `/audio/transcriptions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of transcription requests received
    pub fn transcription_count(&self) -> u32 {
        self.state.transcription_count.load(Ordering::Relaxed)
    }

    /// Number of chat completion requests received
    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    /// Authorization header of the most recent request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }

    /// (role, content) pairs of the most recent chat completion request
    pub fn last_messages(&self) -> Vec<(String, String)> {
        self.state.last_messages.lock().unwrap().clone()
    }

    /// Model of the most recent chat completion request
    pub fn last_model(&self) -> Option<String> {
        self.state.last_model.lock().unwrap().clone()
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcriptions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: axum::extract::Multipart,
) -> axum::response::Response {
    state.transcription_count.fetch_add(1, Ordering::Relaxed);
    record_authorization(&state, &headers);

    if let Some((status, body)) = &state.failure {
        return failure_response(*status, body);
    }

    // The gateway always sends a file and the fixed form fields
    let mut saw_file = false;
    let mut saw_model = false;
    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("file") => saw_file = true,
            Some("model") => saw_model = true,
            _ => {}
        }
    }
    if !saw_file || !saw_model {
        return (StatusCode::BAD_REQUEST, "missing file or model field").into_response();
    }

    Json(serde_json::json!({ "text": state.transcript })).into_response()
}

#[derive(Debug, Deserialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(request): Json<ChatCompletionRequest>,
) -> axum::response::Response {
    state.completion_count.fetch_add(1, Ordering::Relaxed);
    record_authorization(&state, &headers);

    *state.last_model.lock().unwrap() = Some(request.model);
    *state.last_messages.lock().unwrap() = request
        .messages
        .into_iter()
        .map(|m| (m.role, m.content))
        .collect();

    if let Some((status, body)) = &state.failure {
        return failure_response(*status, body);
    }

    Json(serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": state.completion } }
        ]
    }))
    .into_response()
}

fn record_authorization(state: &MockState, headers: &HeaderMap) {
    *state.last_authorization.lock().unwrap() = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
}

fn failure_response(status: u16, body: &str) -> axum::response::Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, body.to_owned()).into_response()
}
