use async_trait::async_trait;
use dreamfairy_core::{ProxyError, provider_message};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::SpeechProvider;

/// `ElevenLabs` TTS provider
pub struct ElevenLabsProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
}

impl ElevenLabsProvider {
    pub fn new(api_key: Option<SecretString>, base_url: &url::Url, model: &str) -> Self {
        Self {
            client: dreamfairy_core::http_client(),
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            api_key: api_key.filter(|key| !key.expose_secret().is_empty()),
            model: model.to_owned(),
        }
    }
}

#[derive(serde::Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

/// Storybook delivery: steady but expressive
const STORYBOOK_SETTINGS: VoiceSettings = VoiceSettings {
    stability: 0.5,
    similarity_boost: 0.75,
    style: 0.5,
    use_speaker_boost: true,
};

#[derive(serde::Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

#[async_trait]
impl SpeechProvider for ElevenLabsProvider {
    async fn synthesize(&self, text: &str, voice_id: &str) -> dreamfairy_core::Result<Vec<u8>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProxyError::missing_api_key("ELEVENLABS"))?;

        let url = format!("{}/text-to-speech/{voice_id}", self.base_url);

        tracing::debug!(model = %self.model, voice_id, input_len = text.len(), "ElevenLabs TTS request");

        let body = ElevenLabsRequest {
            text,
            model_id: &self.model,
            voice_settings: &STORYBOOK_SETTINGS,
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", api_key.expose_secret())
            .header(http::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "ElevenLabs request failed");
                ProxyError::upstream(format!("Failed to reach ElevenLabs: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            tracing::error!(status = %status, "ElevenLabs API error");

            return Err(ProxyError::upstream(
                provider_message(&body).unwrap_or_else(|| format!("ElevenLabs API error: {status}")),
            ));
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read ElevenLabs response body");
            ProxyError::upstream(format!("Failed to read ElevenLabs audio: {e}"))
        })?;

        Ok(audio.to_vec())
    }
}
