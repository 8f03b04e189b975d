#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod identity;
pub mod imagegen;
mod loader;
pub mod server;
pub mod story;
pub mod stt;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use cors::*;
pub use identity::*;
pub use imagegen::*;
pub use server::*;
pub use story::*;
pub use stt::*;
pub use telemetry::*;
pub use tts::*;

/// Top-level gateway configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Identity service used to resolve bearer tokens
    #[serde(default)]
    pub identity: Option<IdentityConfig>,
    /// Story generation (chat model) configuration
    #[serde(default)]
    pub story: StoryConfig,
    /// Illustration provider configuration
    #[serde(default)]
    pub imagegen: ImageGenConfig,
    /// Transcription and transcript correction configuration
    #[serde(default)]
    pub stt: SttConfig,
    /// Narration provider configuration
    #[serde(default)]
    pub tts: TtsConfig,
    /// Logging and trace export configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Parse a URL literal used as a serde default
pub(crate) fn default_url(raw: &str) -> url::Url {
    match url::Url::parse(raw) {
        Ok(url) => url,
        Err(e) => unreachable!("built-in URL {raw} must parse: {e}"),
    }
}
