//! confab-client: Headless chat client for the confab assistant server
//!
//! This crate provides the non-UI half of confab, including:
//! - Wire types for the server's JSON endpoints
//! - An HTTP transport behind a trait seam (testable without a server)
//! - The conversation session view-model (messages, counter, placeholders)
//! - Lightweight message markup formatting
//! - Configuration and transcript export

pub mod api;
pub mod config;
pub mod markup;
pub mod session;
pub mod transcript;
pub mod transport;

// Re-export commonly used types
pub use api::{ChatRequest, ChatResponse, ClearResponse, HealthResponse, SearchResult};
pub use config::{Config, ConfigError};
pub use markup::{format_markup, MarkupSpan, MarkupStyle};
pub use session::{
    Citation, Entry, Message, PendingSend, PendingToken, Role, Session, MAX_CITATIONS,
};
pub use transcript::{export_transcript, TranscriptError};
pub use transport::{HttpTransport, Transport, TransportError};

/// Returns the client version.
pub fn client_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_version() {
        let version = client_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
