use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Illustration provider (`GetImg`) configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenConfig {
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_getimg_url")]
    pub base_url: Url,
    /// Model route under the base URL
    #[serde(default = "default_image_model")]
    pub model: String,
    /// Diffusion steps; kept small for the fast generation tier
    #[serde(default = "default_steps")]
    pub steps: u32,
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_getimg_url(),
            model: default_image_model(),
            steps: default_steps(),
        }
    }
}

fn default_getimg_url() -> Url {
    crate::default_url("https://api.getimg.ai/v1")
}

fn default_image_model() -> String {
    "flux-schnell".to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_steps() -> u32 {
    4
}
