use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Identity service that resolves bearer tokens to users
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    /// Base URL of the identity service (e.g. the project URL)
    pub url: Url,

    /// Service credential sent as the `apikey` header
    pub service_key: SecretString,

    /// Timeout for a single token lookup in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout() -> u64 {
    10
}
