use async_trait::async_trait;
use dreamfairy_core::{ProxyError, provider_message};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    ChatModel,
    types::{ChatRequest, ChatResponse},
};

/// Chat completions against `OpenAI` or a compatible endpoint
pub struct OpenAiChat {
    client: Client,
    completions_url: String,
    api_key: Option<SecretString>,
}

impl OpenAiChat {
    /// Create a client; an absent or empty key fails each call, not construction
    pub fn new(api_key: Option<SecretString>, base_url: &url::Url) -> Self {
        Self {
            client: dreamfairy_core::http_client(),
            completions_url: format!("{}/chat/completions", base_url.as_str().trim_end_matches('/')),
            api_key: api_key.filter(|key| !key.expose_secret().is_empty()),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, request: ChatRequest) -> dreamfairy_core::Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProxyError::missing_api_key("OPENAI"))?;

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "sending chat completion request"
        );

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "chat completion request failed");
                ProxyError::upstream(format!("Failed to reach OpenAI: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            tracing::error!(status = %status, "OpenAI chat completion error");

            return Err(ProxyError::upstream(
                provider_message(&body).unwrap_or_else(|| format!("OpenAI API error: {status}")),
            ));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse chat completion response");
            ProxyError::upstream("Invalid response from OpenAI")
        })?;

        Ok(completion.into_content())
    }
}
