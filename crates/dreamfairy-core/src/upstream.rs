use serde_json::Value;

/// Pull a human-readable message out of a provider error body
///
/// Providers disagree on the shape; tries `error.message`, then a bare
/// `error` string, then `message`, then `detail.message` (`ElevenLabs`).
pub fn provider_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let message = value
        .pointer("/error/message")
        .or_else(|| value.get("error").filter(|error| error.is_string()))
        .or_else(|| value.get("message"))
        .or_else(|| value.pointer("/detail/message"))
        .and_then(Value::as_str)?;

    let message = message.trim();
    (!message.is_empty()).then(|| message.to_owned())
}
