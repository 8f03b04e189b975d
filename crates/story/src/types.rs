use dreamfairy_core::{Language, Payload, ProxyError, lenient_string, required_field};
use serde::{Deserialize, Serialize};

/// Body of a generate-story call
#[derive(Debug, Deserialize)]
pub struct StoryGenerationRequest {
    /// Story premise picked by the reader
    #[serde(default, deserialize_with = "lenient_string")]
    pub seed: Option<String>,
    /// Choices taken so far, oldest first
    #[serde(default)]
    pub history: Option<Vec<String>>,
    /// Language code; unknown codes fall back to English
    #[serde(default)]
    pub language: Option<String>,
}

impl Payload for StoryGenerationRequest {}

/// Validated story generation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryPrompt {
    pub seed: String,
    pub history: Vec<String>,
    pub language: Language,
}

impl StoryGenerationRequest {
    /// Check required fields and apply defaults
    pub fn validate(self) -> Result<StoryPrompt, ProxyError> {
        let seed = required_field(self.seed, "Seed is required")?;

        Ok(StoryPrompt {
            seed,
            history: self.history.unwrap_or_default(),
            language: Language::from_code(self.language.as_deref()),
        })
    }
}

/// One story node: a passage plus the branches the reader can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryGenerationResult {
    pub story: String,
    pub choices: Vec<String>,
}
