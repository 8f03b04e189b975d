use std::fmt::Write as _;

use dreamfairy_llm::ChatMessage;

use crate::types::StoryPrompt;

const STORYTELLER: &str = "You are Dream Fairy, a gentle storyteller for children aged 4 to 8. \
Write short, vivid, age-appropriate story passages of three to five sentences. \
Never include violence, fear or anything unsuitable for a bedtime story. \
Always answer with a single JSON object of the form \
{\"story\": \"<passage>\", \"choices\": [\"<choice>\", \"<choice>\"]} \
where \"choices\" holds two to four short options for what the hero could do next. \
Do not write anything outside the JSON object.";

/// Build the conversation that asks the model for the next story node
pub fn story_messages(prompt: &StoryPrompt) -> Vec<ChatMessage> {
    let system = format!(
        "{STORYTELLER}\nWrite the story and the choices in {}.",
        prompt.language.display_name()
    );

    let mut user = format!("Story seed: {}\n", prompt.seed);

    if prompt.history.is_empty() {
        user.push_str("Begin the story.");
    } else {
        user.push_str("Choices made so far:\n");
        for (step, choice) in prompt.history.iter().enumerate() {
            // Writing to a String is infallible
            let _ = writeln!(user, "{}. {}", step + 1, choice.trim());
        }
        user.push_str("Continue the story from the most recent choice.");
    }

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
