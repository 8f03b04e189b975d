use std::sync::Arc;

use dreamfairy_config::StoryConfig;
use dreamfairy_llm::{ChatModel, ChatRequest, OpenAiChat};

use crate::{
    parse::parse_story_node,
    prompt::story_messages,
    types::{StoryGenerationResult, StoryPrompt},
};

/// Completion parameters for story nodes
#[derive(Debug, Clone)]
pub struct StorySettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl From<&StoryConfig> for StorySettings {
    fn from(config: &StoryConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Story server that asks a chat model for the next story node
pub struct Server {
    model: Arc<dyn ChatModel>,
    settings: StorySettings,
}

impl Server {
    pub fn new(model: Arc<dyn ChatModel>, settings: StorySettings) -> Self {
        Self { model, settings }
    }

    pub fn from_config(config: &StoryConfig) -> Self {
        tracing::debug!(model = %config.model, "initializing story generation");

        Self::new(
            Arc::new(OpenAiChat::new(config.api_key.clone(), &config.base_url)),
            StorySettings::from(config),
        )
    }

    /// Generate one story node for a validated prompt
    pub async fn generate(&self, prompt: &StoryPrompt) -> dreamfairy_core::Result<StoryGenerationResult> {
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: story_messages(prompt),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let content = self.model.complete(request).await?;

        parse_story_node(&content)
    }
}
