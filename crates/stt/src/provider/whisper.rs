use async_trait::async_trait;
use dreamfairy_core::{ProxyError, provider_message};
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, SecretString};

use super::TranscriptionProvider;

/// Biases the recogniser towards short imperative story actions
const ACTION_PROMPT: &str = "The speaker is a child saying what should happen next in a story, \
for example \"plant the seed\" or \"follow the rabbit\".";

/// `OpenAI` Whisper STT provider
pub struct WhisperProvider {
    client: Client,
    transcriptions_url: String,
    api_key: Option<SecretString>,
    model: String,
    language: String,
}

impl WhisperProvider {
    pub fn new(api_key: Option<SecretString>, base_url: &url::Url, model: &str, language: &str) -> Self {
        Self {
            client: dreamfairy_core::http_client(),
            transcriptions_url: format!("{}/audio/transcriptions", base_url.as_str().trim_end_matches('/')),
            api_key: api_key.filter(|key| !key.expose_secret().is_empty()),
            model: model.to_owned(),
            language: language.to_owned(),
        }
    }
}

#[derive(serde::Deserialize)]
struct WhisperResponse {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl TranscriptionProvider for WhisperProvider {
    async fn transcribe(&self, audio: Vec<u8>) -> dreamfairy_core::Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProxyError::missing_api_key("OPENAI"))?;

        tracing::debug!(
            audio_bytes = audio.len(),
            model = %self.model,
            language = %self.language,
            "Whisper transcription request"
        );

        let file = Part::bytes(audio)
            .file_name("audio.m4a")
            .mime_str("audio/m4a")
            .map_err(|e| ProxyError::Internal(e.into()))?;

        let form = Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("prompt", ACTION_PROMPT);

        let response = self
            .client
            .post(&self.transcriptions_url)
            .bearer_auth(api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Whisper request failed");
                ProxyError::upstream(format!("Failed to reach OpenAI: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            tracing::error!(status = %status, "Whisper API error");

            return Err(ProxyError::upstream(
                provider_message(&body).unwrap_or_else(|| format!("OpenAI API error: {status}")),
            ));
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse Whisper response");
            ProxyError::upstream("Invalid response from OpenAI")
        })?;

        Ok(result.text.trim().to_owned())
    }
}
