pub(crate) mod whisper;

use async_trait::async_trait;

/// Trait for speech-to-text provider implementations
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Transcribe a recording to raw text
    async fn transcribe(&self, audio: Vec<u8>) -> dreamfairy_core::Result<String>;
}
