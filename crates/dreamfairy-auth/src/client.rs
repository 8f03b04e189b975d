use std::time::Duration;

use dreamfairy_config::IdentityConfig;
use dreamfairy_core::AuthenticatedUser;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::AuthError;

/// User record as returned by the identity service
#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

/// Resolves bearer tokens by calling the identity service
///
/// Lookups are never cached: a revoked session stops working on the very
/// next request.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    user_url: url::Url,
    service_key: SecretString,
}

impl IdentityClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the service URL
    /// cannot be extended with the user endpoint path
    pub fn new(config: &IdentityConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let user_url = format!("{}/auth/v1/user", config.url.as_str().trim_end_matches('/'))
            .parse::<url::Url>()
            .map_err(|e| anyhow::anyhow!("invalid identity service URL: {e}"))?;

        Ok(Self {
            http,
            user_url,
            service_key: config.service_key.clone(),
        })
    }

    /// Resolve a bearer token to the user it belongs to
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the service is unreachable, rejects the token,
    /// or answers without a user ID
    pub async fn resolve(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .http
            .get(self.user_url.clone())
            .header("apikey", self.service_key.expose_secret())
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }

        let record: UserRecord = response
            .json()
            .await
            .map_err(|e| AuthError::NoUser(format!("failed to parse response: {e}")))?;

        let id = record
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AuthError::NoUser("missing user id".to_owned()))?;

        Ok(AuthenticatedUser {
            id,
            email: record.email,
            role: record.role,
        })
    }
}
