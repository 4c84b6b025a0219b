//! Wire types for the assistant server's JSON endpoints.
//!
//! The server exposes three endpoints the client consumes:
//! - `POST /chat` with a [`ChatRequest`] body, answered by a [`ChatResponse`]
//! - `POST /clear` with no body, answered by a [`ClearResponse`]
//! - `GET /health`, answered by a [`HealthResponse`]
//!
//! Every optional response field tolerates absence; error responses carry
//! `success: false` plus an `error` string and may omit everything else.

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,
}

/// Response body for `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Whether the server produced a reply.
    pub success: bool,
    /// Assistant reply text (present on success).
    #[serde(default)]
    pub response: Option<String>,
    /// Search results the reply was grounded on, if any.
    #[serde(default)]
    pub search_results: Option<Vec<SearchResult>>,
    /// Whether the server consulted web search for this reply.
    #[serde(default)]
    pub used_search: Option<bool>,
    /// Server-side conversation length after this turn.
    #[serde(default)]
    pub history_length: Option<u64>,
    /// Error description (present on failure).
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatResponse {
    /// Build a successful reply (used by tests and fakes).
    pub fn reply(text: impl Into<String>, history_length: u64) -> Self {
        Self {
            success: true,
            response: Some(text.into()),
            search_results: None,
            used_search: Some(false),
            history_length: Some(history_length),
            error: None,
        }
    }

    /// Build a failure reply (used by tests and fakes).
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            search_results: None,
            used_search: None,
            history_length: None,
            error: Some(error.into()),
        }
    }
}

/// A single search result attached to an assistant reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Full URL of the source.
    pub link: String,
    /// Short display label for the source (typically the host).
    #[serde(rename = "displayLink")]
    pub display_link: String,
}

/// Response body for `POST /clear`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClearResponse {
    /// Whether the server-side history was cleared.
    pub success: bool,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status string (e.g. "healthy").
    pub status: String,
    /// Whether the assistant model is configured.
    #[serde(default)]
    pub gemini_configured: bool,
    /// Whether web search is configured.
    #[serde(default)]
    pub search_configured: bool,
    /// Number of live conversations on the server.
    #[serde(default)]
    pub active_conversations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let req = ChatRequest {
            message: "What's the weather?".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"message":"What's the weather?"}"#);
    }

    #[test]
    fn test_chat_response_full() {
        let json = r#"{
            "success": true,
            "response": "Sunny, 31C",
            "used_search": true,
            "search_results": [
                {"link": "https://weather.example/mumbai", "displayLink": "weather.example"}
            ],
            "history_length": 4
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.response.as_deref(), Some("Sunny, 31C"));
        assert_eq!(resp.used_search, Some(true));
        assert_eq!(resp.history_length, Some(4));
        let results = resp.search_results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_link, "weather.example");
    }

    #[test]
    fn test_chat_response_error_shape() {
        // Failure responses omit everything but the error text
        let json = r#"{"success": false, "error": "Empty message"}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Empty message"));
        assert!(resp.response.is_none());
        assert!(resp.search_results.is_none());
    }

    #[test]
    fn test_chat_response_minimal() {
        // A bare success with no optional fields must still parse
        let resp: ChatResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.history_length.is_none());
    }

    #[test]
    fn test_search_result_wire_name() {
        let json = r#"{"link": "https://a.example/x", "displayLink": "a.example"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.display_link, "a.example");

        // Round-trips with the camelCase wire name
        let back = serde_json::to_string(&result).unwrap();
        assert!(back.contains("displayLink"));
    }

    #[test]
    fn test_health_response() {
        let json = r#"{
            "status": "healthy",
            "gemini_configured": true,
            "search_configured": false,
            "active_conversations": 2
        }"#;
        let health: HealthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(health.status, "healthy");
        assert!(health.gemini_configured);
        assert!(!health.search_configured);
        assert_eq!(health.active_conversations, 2);
    }
}
