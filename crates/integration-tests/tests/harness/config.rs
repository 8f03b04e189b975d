//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use dreamfairy_config::{Config, IdentityConfig};
use secrecy::SecretString;
use url::Url;

use super::mock_backend::{MockBackend, SERVICE_KEY};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with every service pointed at the mock backend
    pub fn new(backend: &MockBackend) -> Self {
        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));

        config.identity = Some(IdentityConfig {
            url: parse(&backend.base_url()),
            service_key: SecretString::from(SERVICE_KEY),
            timeout_seconds: 5,
        });

        let openai = parse(&format!("{}/v1", backend.base_url()));

        config.story.api_key = Some(SecretString::from("sk-story"));
        config.story.base_url = openai.clone();
        config.stt.api_key = Some(SecretString::from("sk-stt"));
        config.stt.base_url = openai;
        config.imagegen.api_key = Some(SecretString::from("gk-test"));
        config.imagegen.base_url = parse(&backend.base_url());
        config.tts.api_key = Some(SecretString::from("el-test"));
        config.tts.base_url = parse(&format!("{}/v1", backend.base_url()));

        Self { config }
    }

    /// Drop every provider API key
    pub fn without_api_keys(mut self) -> Self {
        self.config.story.api_key = None;
        self.config.imagegen.api_key = None;
        self.config.stt.api_key = None;
        self.config.tts.api_key = None;
        self
    }

    /// Replace the built-in fairy voice
    pub fn with_fairy_voice(mut self, voice_id: &str) -> Self {
        self.config.tts.voices.fairy = Some(voice_id.to_owned());
        self
    }

    /// Mount the functions under another prefix
    pub fn with_path_prefix(mut self, prefix: &str) -> Self {
        prefix.clone_into(&mut self.config.server.path_prefix);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}

fn parse(raw: &str) -> Url {
    raw.parse().expect("valid URL")
}
