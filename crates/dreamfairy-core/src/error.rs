use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Keeps the status mapping separate from the envelope rendering so every
/// endpoint answers with the same `{ "error": ... }` body.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// Errors surfaced by the proxy endpoints
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Missing, empty or unresolvable bearer credential
    #[error("{0}")]
    Unauthorized(String),

    /// Endpoint called with a verb other than `POST`
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Missing or invalid request field
    #[error("{0}")]
    BadRequest(String),

    /// Provider call failed or returned unusable data
    #[error("{0}")]
    Upstream(String),

    /// A required provider credential or service is not configured
    #[error("{0}")]
    Configuration(String),

    /// Unexpected internal error, never shown to the caller
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ProxyError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// Error for a provider whose API key is absent, e.g. `missing_api_key("OPENAI")`
    pub fn missing_api_key(provider: &str) -> Self {
        Self::Configuration(format!("{provider}_API_KEY not configured"))
    }
}

impl HttpError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Unauthorized(_) => "authentication_error",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::BadRequest(_) => "invalid_request_error",
            Self::Upstream(_) | Self::Configuration(_) => "upstream_error",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

/// Error body shared by every endpoint
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error_type = self.error_type(), error = %self, "request failed");
        } else {
            tracing::debug!(error_type = self.error_type(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Method fallback for the `POST`-only endpoints
pub async fn method_not_allowed() -> ProxyError {
    ProxyError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(error: ProxyError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unauthorized_renders_envelope() {
        let (status, body) = render(ProxyError::unauthorized("No authorization header")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({ "error": "No authorization header" }));
    }

    #[tokio::test]
    async fn method_not_allowed_is_405() {
        let (status, body) = render(method_not_allowed().await).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn missing_api_key_is_a_server_error() {
        let (status, body) = render(ProxyError::missing_api_key("GETIMG")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "GETIMG_API_KEY not configured");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let (status, body) = render(ProxyError::Internal(anyhow::anyhow!("pool exhausted at 0x1f"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn bad_request_message_is_passed_through() {
        let error = ProxyError::bad_request("Seed is required");

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.client_message(), "Seed is required");
    }
}
