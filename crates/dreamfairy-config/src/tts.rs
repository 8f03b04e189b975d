use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Narration provider (`ElevenLabs`) configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_elevenlabs_url")]
    pub base_url: Url,
    #[serde(default = "default_speech_model")]
    pub model: String,
    /// Per-voice overrides of the built-in voice IDs
    #[serde(default)]
    pub voices: VoiceOverrides,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_elevenlabs_url(),
            model: default_speech_model(),
            voices: VoiceOverrides::default(),
        }
    }
}

/// Optional replacement voice IDs, keyed by voice type
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceOverrides {
    pub narrator: Option<String>,
    pub child: Option<String>,
    pub fairy: Option<String>,
}

fn default_elevenlabs_url() -> Url {
    crate::default_url("https://api.elevenlabs.io/v1")
}

fn default_speech_model() -> String {
    "eleven_multilingual_v2".to_owned()
}
