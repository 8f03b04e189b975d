use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::story::{default_chat_model, default_openai_url};

/// Transcription (Whisper) and transcript correction configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// API key shared by transcription and correction
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_openai_url")]
    pub base_url: Url,
    #[serde(default = "default_transcription_model")]
    pub model: String,
    /// Spoken language passed to the transcription model
    #[serde(default = "default_language")]
    pub language: String,
    /// Chat model used to correct transcripts against the story context
    #[serde(default = "default_chat_model")]
    pub correction_model: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_url(),
            model: default_transcription_model(),
            language: default_language(),
            correction_model: default_chat_model(),
        }
    }
}

fn default_transcription_model() -> String {
    "whisper-1".to_owned()
}

fn default_language() -> String {
    "en".to_owned()
}
