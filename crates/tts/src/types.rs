use base64::{Engine as _, engine::general_purpose::STANDARD};
use dreamfairy_core::{Payload, ProxyError, lenient_string, required_field};
use serde::{Deserialize, Serialize};

use crate::voice::VoiceType;

/// Body of a text-to-speech call
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToSpeechRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    /// One of `narrator`, `child`, `fairy`; defaults to `narrator`
    #[serde(default)]
    pub voice_type: Option<String>,
}

impl Payload for TextToSpeechRequest {}

/// Validated narration input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    pub text: String,
    pub voice: VoiceType,
}

impl TextToSpeechRequest {
    pub fn validate(self) -> Result<Narration, ProxyError> {
        let text = required_field(self.text, "Text is required")?;

        let voice = match self.voice_type.as_deref().map(str::trim) {
            None | Some("") => VoiceType::default(),
            Some(name) => name
                .parse()
                .map_err(|_| ProxyError::bad_request("Invalid voice type"))?,
        };

        Ok(Narration { text, voice })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToSpeechResult {
    /// Base64-encoded MP3
    pub audio_data: String,
    /// The same audio as a playable `data:` URI
    pub audio_url: String,
}

impl TextToSpeechResult {
    pub fn from_mp3(audio: &[u8]) -> Self {
        let audio_data = STANDARD.encode(audio);

        Self {
            audio_url: format!("data:audio/mpeg;base64,{audio_data}"),
            audio_data,
        }
    }
}
