#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod provider;
mod server;
mod types;
mod voice;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use dreamfairy_auth::Authenticated;
use dreamfairy_core::{JsonBody, method_not_allowed};

pub use provider::{SpeechProvider, elevenlabs::ElevenLabsProvider};
pub use server::Server;
pub use types::{Narration, TextToSpeechRequest, TextToSpeechResult};
pub use voice::{VoiceTable, VoiceType};

/// Build the TTS server from configuration
pub fn build_server(config: &dreamfairy_config::Config) -> anyhow::Result<Arc<Server>> {
    Ok(Arc::new(Server::from_config(&config.tts)))
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/text-to-speech", post(synthesize).fallback(method_not_allowed))
}

/// Handle speech synthesis requests
async fn synthesize(
    State(server): State<Arc<Server>>,
    Authenticated(user): Authenticated,
    JsonBody(request): JsonBody<TextToSpeechRequest>,
) -> dreamfairy_core::Result<Json<TextToSpeechResult>> {
    let narration = request.validate()?;

    tracing::debug!(
        user_id = %user.id,
        voice = narration.voice.as_ref(),
        text_len = narration.text.len(),
        "TTS speech handler called"
    );

    let result = server.synthesize(&narration).await?;

    tracing::debug!(audio_len = result.audio_data.len(), "speech synthesis complete");

    Ok(Json(result))
}
