use std::sync::Arc;

use dreamfairy_config::SttConfig;
use dreamfairy_llm::OpenAiChat;

use crate::{
    corrector::TranscriptCorrector,
    provider::{TranscriptionProvider, whisper::WhisperProvider},
    types::AudioClip,
};

/// STT server: transcription followed by optional story-aware correction
pub struct Server {
    provider: Arc<dyn TranscriptionProvider>,
    corrector: TranscriptCorrector,
}

impl Server {
    pub fn new(provider: Arc<dyn TranscriptionProvider>, corrector: TranscriptCorrector) -> Self {
        Self { provider, corrector }
    }

    pub fn from_config(config: &SttConfig) -> Self {
        tracing::debug!(model = %config.model, language = %config.language, "initializing STT");

        let provider = WhisperProvider::new(config.api_key.clone(), &config.base_url, &config.model, &config.language);
        let chat = OpenAiChat::new(config.api_key.clone(), &config.base_url);

        Self::new(
            Arc::new(provider),
            TranscriptCorrector::new(Arc::new(chat), config.correction_model.clone()),
        )
    }

    /// Transcribe a clip, correcting it when story context is available
    pub async fn transcribe(&self, clip: AudioClip) -> dreamfairy_core::Result<String> {
        let transcript = self.provider.transcribe(clip.audio).await?;

        match clip.story_context {
            Some(context) => Ok(self.corrector.correct(&transcript, &context).await),
            None => Ok(transcript),
        }
    }
}
