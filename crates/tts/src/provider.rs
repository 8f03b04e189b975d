pub(crate) mod elevenlabs;

use async_trait::async_trait;

/// Trait for speech synthesis provider implementations
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize `text` with the given provider voice, returning MP3 bytes
    async fn synthesize(&self, text: &str, voice_id: &str) -> dreamfairy_core::Result<Vec<u8>>;
}
