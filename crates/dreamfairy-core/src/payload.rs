use axum::extract::{FromRequest, Request};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::ProxyError;

/// Request body type accepted by an endpoint
pub trait Payload: DeserializeOwned {
    /// Largest accepted body in bytes
    const BODY_LIMIT: usize = 1 << 20;
}

/// Extractor for JSON request bodies
///
/// Unlike `axum::Json` it does not insist on a `Content-Type` header and it
/// reports every failure through the shared error envelope.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: Payload,
{
    type Rejection = ProxyError;

    async fn from_request(request: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(request.into_body(), T::BODY_LIMIT)
            .await
            .map_err(|err| {
                if std::error::Error::source(&err)
                    .is_some_and(|source| source.is::<http_body_util::LengthLimitError>())
                {
                    ProxyError::bad_request("Request body is too large")
                } else {
                    ProxyError::bad_request(format!("Failed to read request body: {err}"))
                }
            })?;

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            tracing::debug!(error = %e, "rejecting malformed JSON body");
            ProxyError::bad_request("Invalid JSON body")
        })
    }
}

/// Deserialize a field that should be a string, treating any other JSON type as absent
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}

/// Require a non-blank string field, returning it trimmed
pub fn required_field(value: Option<String>, message: &str) -> Result<String, ProxyError> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ProxyError::bad_request(message))
}
