use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Story generation through an OpenAI-compatible chat completions API
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryConfig {
    /// API key; an empty value counts as not configured
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_openai_url")]
    pub base_url: Url,
    #[serde(default = "default_chat_model")]
    pub model: String,
    /// Sampling temperature for story text
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Completion budget for one story node
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_url(),
            model: default_chat_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

pub(crate) fn default_openai_url() -> Url {
    crate::default_url("https://api.openai.com/v1")
}

pub(crate) fn default_chat_model() -> String {
    "gpt-4o-mini".to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_temperature() -> f32 {
    0.8
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_tokens() -> u32 {
    600
}
