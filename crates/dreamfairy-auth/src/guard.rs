use std::sync::Arc;

use axum::extract::FromRequestParts;
use dreamfairy_core::{AuthenticatedUser, ProxyError};
use http::{HeaderMap, request::Parts};

use crate::IdentityClient;

/// Extract the bearer token from the `Authorization` header
///
/// # Errors
///
/// Returns `Unauthorized` when the header is absent, or when it carries no
/// usable bearer token
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ProxyError> {
    let value = headers
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ProxyError::unauthorized("No authorization header"))?;

    let no_token = || ProxyError::unauthorized("No token provided");

    let value = value.to_str().map_err(|_| no_token())?.trim();
    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(no_token());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(no_token());
    }

    Ok(token)
}

/// Shared handle that turns bearer tokens into users
///
/// Installed once as a request extension by the server; carries no client
/// when the identity service is not configured.
#[derive(Clone, Default)]
pub struct AuthGuard {
    client: Option<Arc<IdentityClient>>,
}

impl AuthGuard {
    pub fn new(client: IdentityClient) -> Self {
        Self {
            client: Some(Arc::new(client)),
        }
    }

    /// Guard used when no identity service is configured
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Resolve a token, mapping every lookup failure to "Invalid token"
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the token does not resolve to a user, or
    /// `Configuration` if there is no identity service to ask
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, ProxyError> {
        let Some(ref client) = self.client else {
            return Err(ProxyError::Configuration("Identity service not configured".to_owned()));
        };

        match client.resolve(token).await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "request authenticated");
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "bearer token authentication failed");
                Err(ProxyError::unauthorized("Invalid token"))
            }
        }
    }
}

/// Extractor yielding the user behind the request's bearer token
pub struct Authenticated(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let guard = parts
            .extensions
            .get::<AuthGuard>()
            .ok_or_else(|| ProxyError::Internal(anyhow::anyhow!("auth guard extension is not installed")))?;

        guard.authenticate(token).await.map(Self)
    }
}
