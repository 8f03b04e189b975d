use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use dreamfairy_core::{Language, Payload, ProxyError, lenient_string, required_field};
use serde::{Deserialize, Serialize};

/// Standard alphabet that tolerates missing padding
const AUDIO_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Body of a speech-to-text call
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechToTextRequest {
    /// Base64 audio, optionally as a `data:` URI
    #[serde(default, deserialize_with = "lenient_string")]
    pub audio_data: Option<String>,
    /// Recent story text used to correct mis-heard words
    #[serde(default)]
    pub story_context: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl Payload for SpeechToTextRequest {
    const BODY_LIMIT: usize = 32 << 20;
}

/// Decoded recording ready for transcription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub audio: Vec<u8>,
    /// Non-blank story context, trimmed
    pub story_context: Option<String>,
    pub language: Language,
}

impl SpeechToTextRequest {
    pub fn validate(self) -> Result<AudioClip, ProxyError> {
        let encoded = required_field(self.audio_data, "Audio data is required")?;

        Ok(AudioClip {
            audio: decode_audio(&encoded)?,
            story_context: self
                .story_context
                .map(|context| context.trim().to_owned())
                .filter(|context| !context.is_empty()),
            language: Language::from_code(self.language.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechToTextResult {
    pub transcript: String,
}

/// Decode base64 audio, dropping a leading `data:<mime>;base64,` prefix
fn decode_audio(encoded: &str) -> Result<Vec<u8>, ProxyError> {
    let payload = match encoded.strip_prefix("data:") {
        Some(uri) => uri.split_once(',').map_or(uri, |(_, data)| data),
        None => encoded,
    };

    let compact: String = payload.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();

    AUDIO_BASE64
        .decode(compact)
        .ok()
        .filter(|audio| !audio.is_empty())
        .ok_or_else(|| ProxyError::bad_request("Invalid audio data"))
}
