use async_trait::async_trait;
use dreamfairy_core::{ProxyError, provider_message};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use super::ImageProvider;
use crate::types::ImagePrompt;

/// `GetImg` text-to-image provider
pub struct GetImgProvider {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
    steps: u32,
}

impl GetImgProvider {
    pub fn new(api_key: Option<SecretString>, base_url: &url::Url, model: &str, steps: u32) -> Self {
        Self {
            client: dreamfairy_core::http_client(),
            endpoint: format!(
                "{}/{}/text-to-image",
                base_url.as_str().trim_end_matches('/'),
                model.trim_matches('/')
            ),
            api_key: api_key.filter(|key| !key.expose_secret().is_empty()),
            steps,
        }
    }
}

#[derive(Serialize)]
struct TextToImage<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
    steps: u32,
    response_format: &'static str,
}

/// Places a hosted image URL may appear, in provider preference order
const URL_POINTERS: [&str; 4] = ["/url", "/image_url", "/images/0/url", "/data/0/url"];

/// First non-empty URL found by trying each location independently
fn extract_url(body: &Value) -> Option<String> {
    URL_POINTERS
        .iter()
        .filter_map(|pointer| body.pointer(pointer).and_then(Value::as_str))
        .map(str::trim)
        .find(|url| !url.is_empty())
        .map(str::to_owned)
}

#[async_trait]
impl ImageProvider for GetImgProvider {
    async fn generate(&self, prompt: &ImagePrompt) -> dreamfairy_core::Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProxyError::missing_api_key("GETIMG"))?;

        tracing::debug!(
            width = prompt.width,
            height = prompt.height,
            prompt_len = prompt.prompt.len(),
            "GetImg text-to-image request"
        );

        let body = TextToImage {
            prompt: &prompt.prompt,
            width: prompt.width,
            height: prompt.height,
            steps: self.steps,
            response_format: "url",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "GetImg request failed");
                ProxyError::upstream(format!("Failed to reach GetImg: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            tracing::error!(status = %status, "GetImg API error");

            return Err(ProxyError::upstream(
                provider_message(&body).unwrap_or_else(|| format!("GetImg API error: {status}")),
            ));
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read GetImg response body");
            ProxyError::upstream("No image URL returned from API")
        })?;

        serde_json::from_str::<Value>(&body)
            .ok()
            .as_ref()
            .and_then(extract_url)
            .ok_or_else(|| {
                tracing::warn!(body_len = body.len(), "GetImg response carried no image URL");
                ProxyError::upstream("No image URL returned from API")
            })
    }
}
