//! HTTP transport for the assistant server.
//!
//! The [`Transport`] trait is the seam between the session/UI layers and
//! the network: production code uses [`HttpTransport`] over `reqwest`,
//! while tests drive the session with scripted fakes.

use crate::api::{ChatRequest, ChatResponse, ClearResponse, HealthResponse};
use async_trait::async_trait;

/// Errors that can occur talking to the server.
///
/// The `Display` text of a variant is what the UI surfaces after the
/// `"Error: "` prefix in the transcript.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network-level failure (connection refused, DNS, etc.).
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The server answered with a body that is not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The configured server URL could not be parsed.
    #[error("invalid server URL {url:?}: {reason}")]
    Url {
        /// The offending URL string.
        url: String,
        /// Parser error text.
        reason: String,
    },
}

/// Client-side view of the server endpoints.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a chat message and return the server's reply.
    async fn chat(&self, message: &str) -> Result<ChatResponse, TransportError>;

    /// Clear the server-side conversation history.
    async fn clear(&self) -> Result<ClearResponse, TransportError>;

    /// Fetch server health diagnostics.
    async fn health(&self) -> Result<HealthResponse, TransportError>;
}

/// `reqwest`-backed transport.
///
/// No client-side timeout or retry policy is applied; each request is
/// issued once and whatever the underlying transport defaults are apply.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the given base URL (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let base_url = base_url.into();
        reqwest::Url::parse(&base_url).map_err(|e| TransportError::Url {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL this transport talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn chat(&self, message: &str) -> Result<ChatResponse, TransportError> {
        tracing::debug!(chars = message.chars().count(), "posting chat message");

        let response = self
            .client
            .post(self.endpoint("/chat"))
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(TransportError::Http)?;

        // Error statuses still carry a JSON body with success=false, so
        // decode regardless of status and let the session route it.
        let reply = response
            .json::<ChatResponse>()
            .await
            .map_err(TransportError::Decode)?;

        if !reply.success {
            tracing::warn!(error = reply.error.as_deref(), "server reported chat failure");
        }
        Ok(reply)
    }

    async fn clear(&self) -> Result<ClearResponse, TransportError> {
        tracing::debug!("posting history clear");

        let response = self
            .client
            .post(self.endpoint("/clear"))
            .send()
            .await
            .map_err(TransportError::Http)?;

        response
            .json::<ClearResponse>()
            .await
            .map_err(TransportError::Decode)
    }

    async fn health(&self) -> Result<HealthResponse, TransportError> {
        let response = self
            .client
            .get(self.endpoint("/health"))
            .send()
            .await
            .map_err(TransportError::Http)?;

        response
            .json::<HealthResponse>()
            .await
            .map_err(TransportError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_url() {
        let err = HttpTransport::new("not a url").unwrap_err();
        assert!(matches!(err, TransportError::Url { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let transport = HttpTransport::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(transport.base_url(), "http://127.0.0.1:5000");
        assert_eq!(
            transport.endpoint("/chat"),
            "http://127.0.0.1:5000/chat"
        );
    }
}
