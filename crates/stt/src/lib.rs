#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod corrector;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use dreamfairy_auth::Authenticated;
use dreamfairy_core::{JsonBody, method_not_allowed};

pub use corrector::TranscriptCorrector;
pub use provider::{TranscriptionProvider, whisper::WhisperProvider};
pub use server::Server;
pub use types::{AudioClip, SpeechToTextRequest, SpeechToTextResult};

/// Build the STT server from configuration
pub fn build_server(config: &dreamfairy_config::Config) -> anyhow::Result<Arc<Server>> {
    Ok(Arc::new(Server::from_config(&config.stt)))
}

/// Create the endpoint router for STT
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/speech-to-text", post(transcribe).fallback(method_not_allowed))
}

/// Handle transcription requests
async fn transcribe(
    State(server): State<Arc<Server>>,
    Authenticated(user): Authenticated,
    JsonBody(request): JsonBody<SpeechToTextRequest>,
) -> dreamfairy_core::Result<Json<SpeechToTextResult>> {
    let clip = request.validate()?;

    tracing::debug!(
        user_id = %user.id,
        audio_bytes = clip.audio.len(),
        requested_language = clip.language.code(),
        with_context = clip.story_context.is_some(),
        "STT transcription handler called"
    );

    let transcript = server.transcribe(clip).await?;

    tracing::debug!("transcription complete");

    Ok(Json(SpeechToTextResult { transcript }))
}
