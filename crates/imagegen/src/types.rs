use dreamfairy_core::{Payload, ProxyError, lenient_string, required_field};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub(crate) const DEFAULT_DIMENSION: u32 = 512;
const MIN_DIMENSION: i64 = 64;
const MAX_DIMENSION: i64 = 2048;

/// Body of a generate-image call
#[derive(Debug, Deserialize)]
pub struct ImageGenerationRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub prompt: Option<String>,
    #[serde(default, deserialize_with = "dimension_number")]
    pub width: Option<i64>,
    #[serde(default, deserialize_with = "dimension_number")]
    pub height: Option<i64>,
}

impl Payload for ImageGenerationRequest {}

/// Validated illustration input, dimensions already clamped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePrompt {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

impl ImageGenerationRequest {
    pub fn validate(self) -> Result<ImagePrompt, ProxyError> {
        let prompt = required_field(self.prompt, "Prompt is required")?;

        Ok(ImagePrompt {
            prompt,
            width: dimension(self.width),
            height: dimension(self.height),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationResult {
    pub image_url: String,
}

fn dimension(value: Option<i64>) -> u32 {
    value.map_or(DEFAULT_DIMENSION, |value| {
        // Clamped into [64, 2048], so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let clamped = value.clamp(MIN_DIMENSION, MAX_DIMENSION) as u32;
        clamped
    })
}

/// Accept any JSON number (`512.0` included), rounding fractions; other types are invalid
#[allow(clippy::cast_possible_truncation)]
fn dimension_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Value::Number(number)) => Ok(number
            .as_i64()
            // float casts saturate
            .or_else(|| number.as_f64().map(|value| value.round() as i64))),
        Some(other) => Err(serde::de::Error::custom(format!("expected a number, got {other}"))),
    }
}
