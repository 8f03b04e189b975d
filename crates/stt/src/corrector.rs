use std::sync::Arc;

use dreamfairy_llm::{ChatMessage, ChatModel, ChatRequest};

const CORRECTION_TEMPERATURE: f32 = 0.1;
const CORRECTION_MAX_TOKENS: u32 = 100;

const INSTRUCTIONS: &str = "You fix speech recognition mistakes in what a child said about a story. \
Correct only words that were plausibly mis-heard, using the vocabulary of the story \
(for example \"sea\" should become \"seed\" when the story is about a seed). \
Keep the meaning the speaker intended and do not add anything. \
Reply with the corrected text only.";

/// Quote pairs models like to wrap their answer in
const QUOTES: [(char, char); 3] = [('"', '"'), ('\'', '\''), ('\u{201c}', '\u{201d}')];

/// Repairs transcripts against the story being told
///
/// Correction is best effort: whatever goes wrong, the caller gets the
/// original transcript back.
pub struct TranscriptCorrector {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

impl TranscriptCorrector {
    pub fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    pub async fn correct(&self, transcript: &str, story_context: &str) -> String {
        if transcript.trim().is_empty() {
            return transcript.to_owned();
        }

        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: vec![
                ChatMessage::system(INSTRUCTIONS),
                ChatMessage::user(format!("Story: {story_context}\n\nTranscript: {transcript}")),
            ],
            temperature: CORRECTION_TEMPERATURE,
            max_tokens: CORRECTION_MAX_TOKENS,
        };

        match self.model.complete(request).await {
            Ok(reply) => match strip_quotes(&reply) {
                "" => {
                    tracing::warn!("transcript correction returned nothing, keeping original");
                    transcript.to_owned()
                }
                corrected => {
                    if corrected != transcript {
                        tracing::debug!(original = transcript, corrected, "transcript corrected");
                    }
                    corrected.to_owned()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "transcript correction failed, keeping original");
                transcript.to_owned()
            }
        }
    }
}

fn strip_quotes(reply: &str) -> &str {
    let reply = reply.trim();

    QUOTES
        .iter()
        .find_map(|&(open, close)| reply.strip_prefix(open)?.strip_suffix(close))
        .map_or(reply, str::trim)
}
