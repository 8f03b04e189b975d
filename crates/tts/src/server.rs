use std::sync::Arc;

use dreamfairy_config::TtsConfig;

use crate::{
    provider::{SpeechProvider, elevenlabs::ElevenLabsProvider},
    types::{Narration, TextToSpeechResult},
    voice::VoiceTable,
};

/// TTS server that narrates text in one of the story voices
pub struct Server {
    provider: Arc<dyn SpeechProvider>,
    voices: VoiceTable,
}

impl Server {
    pub fn new(provider: Arc<dyn SpeechProvider>, voices: VoiceTable) -> Self {
        Self { provider, voices }
    }

    pub fn from_config(config: &TtsConfig) -> Self {
        tracing::debug!(model = %config.model, "initializing TTS");

        Self::new(
            Arc::new(ElevenLabsProvider::new(config.api_key.clone(), &config.base_url, &config.model)),
            VoiceTable::with_overrides(&config.voices),
        )
    }

    pub async fn synthesize(&self, narration: &Narration) -> dreamfairy_core::Result<TextToSpeechResult> {
        let voice_id = self.voices.voice_id(narration.voice);

        let audio = self.provider.synthesize(&narration.text, voice_id).await?;

        Ok(TextToSpeechResult::from_mp3(&audio))
    }
}
