pub(crate) mod getimg;

use async_trait::async_trait;

use crate::types::ImagePrompt;

/// Trait for illustration provider implementations
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate an image and return its absolute URL
    async fn generate(&self, prompt: &ImagePrompt) -> dreamfairy_core::Result<String>;
}
