//! Mock provider backend for integration tests
//!
//! One server stands in for the identity service, the chat and Whisper
//! APIs, the image API and the speech API, returning canned responses.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::VALID_TOKEN;

/// Service credential the mock identity service expects in `apikey`
pub const SERVICE_KEY: &str = "service-role-key";

/// Audio bytes every synthesis call returns
pub const MOCK_MP3: &[u8] = b"ID3mock-narration";

pub const STORY_REPLY: &str =
    r#"{"story":"  Pip the fox found a glowing seed.  ","choices":["Plant the seed"," Ask the owl ","Keep walking"]}"#;

/// Mock backend that returns predictable responses
pub struct MockBackend {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    identity_count: AtomicU32,
    story_count: AtomicU32,
    correction_count: AtomicU32,
    transcription_count: AtomicU32,
    image_count: AtomicU32,
    speech_count: AtomicU32,
    /// Answer every provider call with a 500
    failing: AtomicBool,
    story_reply: Mutex<String>,
    transcript: Mutex<String>,
    correction: Mutex<String>,
    image_body: Mutex<serde_json::Value>,
    voices: Mutex<Vec<String>>,
}

impl MockBackend {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            identity_count: AtomicU32::new(0),
            story_count: AtomicU32::new(0),
            correction_count: AtomicU32::new(0),
            transcription_count: AtomicU32::new(0),
            image_count: AtomicU32::new(0),
            speech_count: AtomicU32::new(0),
            failing: AtomicBool::new(false),
            story_reply: Mutex::new(STORY_REPLY.to_owned()),
            transcript: Mutex::new("plant the sea".to_owned()),
            correction: Mutex::new("\"plant the seed\"".to_owned()),
            image_body: Mutex::new(json!({ "images": [{ "url": "https://img.mock/pip.png" }] })),
            voices: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/auth/v1/user", routing::get(handle_user))
            .route("/v1/chat/completions", routing::post(handle_chat))
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .route("/flux-schnell/text-to-image", routing::post(handle_image))
            .route("/v1/text-to-speech/{voice_id}", routing::post(handle_speech))
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

    /// Root URL; services append their own paths
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make every provider endpoint fail with a 500
    pub fn fail_providers(&self) {
        self.state.failing.store(true, Ordering::Relaxed);
    }

    pub fn set_story_reply(&self, reply: &str) {
        *self.state.story_reply.lock().unwrap() = reply.to_owned();
    }

    pub fn set_image_body(&self, body: serde_json::Value) {
        *self.state.image_body.lock().unwrap() = body;
    }

    pub fn identity_count(&self) -> u32 {
        self.state.identity_count.load(Ordering::Relaxed)
    }

    pub fn story_count(&self) -> u32 {
        self.state.story_count.load(Ordering::Relaxed)
    }

    pub fn correction_count(&self) -> u32 {
        self.state.correction_count.load(Ordering::Relaxed)
    }

    pub fn transcription_count(&self) -> u32 {
        self.state.transcription_count.load(Ordering::Relaxed)
    }

    pub fn image_count(&self) -> u32 {
        self.state.image_count.load(Ordering::Relaxed)
    }

    pub fn speech_count(&self) -> u32 {
        self.state.speech_count.load(Ordering::Relaxed)
    }

    /// Total calls that reached any provider (identity excluded)
    pub fn provider_calls(&self) -> u32 {
        self.story_count() + self.correction_count() + self.transcription_count() + self.image_count() + self.speech_count()
    }

    /// Voice IDs requested from the speech API, in order
    pub fn voices(&self) -> Vec<String> {
        self.state.voices.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn provider_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": { "message": "mock provider failure" } })),
    )
        .into_response()
}

async fn handle_user(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.identity_count.fetch_add(1, Ordering::Relaxed);

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    };

    if header("apikey") != SERVICE_KEY || header("authorization") != format!("Bearer {VALID_TOKEN}") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" }))).into_response();
    }

    Json(json!({ "id": "user-1", "email": "reader@dreamfairy.test", "role": "authenticated" })).into_response()
}

#[derive(Deserialize)]
struct ChatRequest {
    temperature: f32,
}

/// Low-temperature calls are transcript corrections, the rest story nodes
async fn handle_chat(State(state): State<Arc<MockState>>, Json(request): Json<ChatRequest>) -> Response {
    let reply = if request.temperature < 0.5 {
        state.correction_count.fetch_add(1, Ordering::Relaxed);
        state.correction.lock().unwrap().clone()
    } else {
        state.story_count.fetch_add(1, Ordering::Relaxed);
        state.story_reply.lock().unwrap().clone()
    };

    if state.failing.load(Ordering::Relaxed) {
        return provider_failure();
    }

    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": reply }, "finish_reason": "stop" }]
    }))
    .into_response()
}

async fn handle_transcription(State(state): State<Arc<MockState>>, body: Bytes) -> Response {
    state.transcription_count.fetch_add(1, Ordering::Relaxed);

    if state.failing.load(Ordering::Relaxed) {
        return provider_failure();
    }

    let form = String::from_utf8_lossy(&body);
    if !form.contains("filename=\"audio.m4a\"") || !form.contains("whisper-1") {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": { "message": "bad upload" } }))).into_response();
    }

    Json(json!({ "text": state.transcript.lock().unwrap().clone() })).into_response()
}

async fn handle_image(State(state): State<Arc<MockState>>, Json(request): Json<serde_json::Value>) -> Response {
    state.image_count.fetch_add(1, Ordering::Relaxed);

    if state.failing.load(Ordering::Relaxed) {
        return provider_failure();
    }

    if request["response_format"] != "url" || request["steps"] != 4 {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "unexpected request" }))).into_response();
    }

    Json(state.image_body.lock().unwrap().clone()).into_response()
}

async fn handle_speech(State(state): State<Arc<MockState>>, Path(voice_id): Path<String>) -> Response {
    state.speech_count.fetch_add(1, Ordering::Relaxed);
    state.voices.lock().unwrap().push(voice_id);

    if state.failing.load(Ordering::Relaxed) {
        return (StatusCode::SERVICE_UNAVAILABLE, "busy").into_response();
    }

    ([(axum::http::header::CONTENT_TYPE, "audio/mpeg")], MOCK_MP3).into_response()
}
