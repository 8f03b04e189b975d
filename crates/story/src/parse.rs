use dreamfairy_core::ProxyError;
use serde::Deserialize;

use crate::types::StoryGenerationResult;

const MAX_CHOICES: usize = 4;
const MIN_CHOICES: usize = 2;

/// Upper bound on embedded objects tried before giving up
const MAX_CANDIDATES: usize = 8;

#[derive(Deserialize)]
struct RawNode {
    story: String,
    choices: Vec<String>,
}

/// Parse a story node out of raw model output
///
/// Two stages: the whole reply as JSON, then the top-level `{...}` regions
/// embedded in surrounding prose or code fences. Failing both is one error.
pub fn parse_story_node(content: &str) -> Result<StoryGenerationResult, ProxyError> {
    let content = content.trim();

    if content.is_empty() {
        return Err(ProxyError::upstream("No response from AI"));
    }

    let node = serde_json::from_str::<RawNode>(content)
        .ok()
        .and_then(normalize)
        .or_else(|| {
            embedded_objects(content)
                .take(MAX_CANDIDATES)
                .find_map(|object| serde_json::from_str::<RawNode>(object).ok().and_then(normalize))
        });

    node.ok_or_else(|| {
        tracing::warn!(content_len = content.len(), "model reply did not contain a story node");
        ProxyError::upstream("Failed to parse AI response")
    })
}

fn normalize(node: RawNode) -> Option<StoryGenerationResult> {
    let story = node.story.trim().to_owned();

    let choices: Vec<String> = node
        .choices
        .into_iter()
        .map(|choice| choice.trim().to_owned())
        .filter(|choice| !choice.is_empty())
        .take(MAX_CHOICES)
        .collect();

    (!story.is_empty() && choices.len() >= MIN_CHOICES).then_some(StoryGenerationResult { story, choices })
}

/// Iterate over the balanced top-level `{...}` regions of `text`
///
/// Braces inside JSON strings are ignored, honouring backslash escapes.
fn embedded_objects(text: &str) -> impl Iterator<Item = &str> {
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    text.char_indices().filter_map(move |(index, ch)| {
        if depth > 0 && in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            return None;
        }

        match ch {
            '{' => {
                if depth == 0 {
                    start = index;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return text.get(start..=index);
                }
            }
            '"' if depth > 0 => in_string = true,
            _ => {}
        }

        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: ProxyError) -> String {
        match err {
            ProxyError::Upstream(message) => message,
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn strict_json_is_parsed_and_trimmed() {
        let node = parse_story_node(r#"{"story":"  Once upon a time...  ","choices":["a","b"]}"#).unwrap();

        assert_eq!(node.story, "Once upon a time...");
        assert_eq!(node.choices, vec!["a", "b"]);
    }

    #[test]
    fn object_wrapped_in_prose_is_recovered() {
        let content = "Here is your story!\n```json\n{\"story\": \"The fox found a {golden} key.\", \
                       \"choices\": [\"Open the door\", \"Ask the owl\", \"Go home\"]}\n```\nEnjoy!";

        let node = parse_story_node(content).unwrap();

        assert_eq!(node.story, "The fox found a {golden} key.");
        assert_eq!(node.choices.len(), 3);
    }

    #[test]
    fn escaped_quotes_do_not_confuse_extraction() {
        let content = r#"Sure: {"story":"She said \"hi}\" softly.","choices":["Wave","Smile"]} done"#;

        let node = parse_story_node(content).unwrap();

        assert_eq!(node.story, "She said \"hi}\" softly.");
    }

    #[test]
    fn later_object_is_used_when_first_is_not_a_node() {
        let content = r#"Use {name} as the hero. {"story":"Pip flew.","choices":["Up","Down"]}"#;

        let node = parse_story_node(content).unwrap();

        assert_eq!(node.story, "Pip flew.");
    }

    #[test]
    fn prose_without_object_fails() {
        let err = parse_story_node("Once upon a time there was a dragon who loved tea.").unwrap_err();
        assert_eq!(message(err), "Failed to parse AI response");
    }

    #[test]
    fn missing_field_fails() {
        let err = parse_story_node(r#"{"story":"Alone"}"#).unwrap_err();
        assert_eq!(message(err), "Failed to parse AI response");
    }

    #[test]
    fn too_few_choices_fails() {
        let err = parse_story_node(r#"{"story":"Pip flew.","choices":["Up", "  "]}"#).unwrap_err();
        assert_eq!(message(err), "Failed to parse AI response");
    }

    #[test]
    fn extra_choices_are_truncated() {
        let node = parse_story_node(r#"{"story":"Pip flew.","choices":["1","2","3","4","5"]}"#).unwrap();
        assert_eq!(node.choices, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn empty_content_is_no_response() {
        assert_eq!(message(parse_story_node("  \n ").unwrap_err()), "No response from AI");
    }

    #[test]
    fn unbalanced_object_fails() {
        let err = parse_story_node(r#"{"story":"Pip","choices":["a","b"]"#).unwrap_err();
        assert_eq!(message(err), "Failed to parse AI response");
    }
}
