use std::sync::Arc;

use dreamfairy_config::ImageGenConfig;

use crate::{
    provider::{ImageProvider, getimg::GetImgProvider},
    types::ImagePrompt,
};

/// Illustration server wrapping a single image provider
pub struct Server {
    provider: Arc<dyn ImageProvider>,
}

impl Server {
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &ImageGenConfig) -> Self {
        tracing::debug!(model = %config.model, steps = config.steps, "initializing image generation");

        Self::new(Arc::new(GetImgProvider::new(
            config.api_key.clone(),
            &config.base_url,
            &config.model,
            config.steps,
        )))
    }

    /// Generate an illustration, returning its URL
    pub async fn generate(&self, prompt: &ImagePrompt) -> dreamfairy_core::Result<String> {
        let url = self.provider.generate(prompt).await?;

        tracing::debug!("image generated");

        Ok(url)
    }
}
