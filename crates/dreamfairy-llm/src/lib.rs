//! OpenAI-compatible chat completions client
//!
//! Shared by story generation and transcript correction. Only the
//! non-streaming, single-choice subset of the protocol is spoken here.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod openai;
mod types;

use async_trait::async_trait;

pub use openai::OpenAiChat;
pub use types::{ChatMessage, ChatRequest, Role};

/// A chat model that turns a conversation into one reply
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete the conversation, returning the reply text (possibly empty)
    async fn complete(&self, request: ChatRequest) -> dreamfairy_core::Result<String>;
}
