//! Conversation session view-model.
//!
//! [`Session`] owns every transcript mutation: appending messages,
//! inserting and removing loading placeholders, mirroring the
//! server-reported history counter, and pruning on clear. The UI layer
//! issues the actual network calls and feeds results back in, so all of
//! the conversation invariants live here and are testable without a
//! terminal or a server.

use crate::api::{ChatResponse, ClearResponse, SearchResult};
use crate::transport::TransportError;
use chrono::{DateTime, Local, Utc};

/// Maximum citation entries rendered per message.
pub const MAX_CITATIONS: usize = 3;

/// Static greeting shown as the first transcript entry. It survives clears.
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm an AI assistant with live web search. Ask me anything.";

/// Example queries offered as one-key shortcuts.
const SAMPLE_QUERIES: &[&str] = &[
    "What's the current Bitcoin price?",
    "What's the weather in Mumbai today?",
    "Latest news on artificial intelligence",
];

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The local user.
    User,
    /// The remote assistant.
    Assistant,
}

/// A citation attached to an assistant message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// Full source URL.
    pub link: String,
    /// Short display label.
    pub label: String,
}

impl From<SearchResult> for Citation {
    fn from(result: SearchResult) -> Self {
        Self {
            link: result.link,
            label: result.display_link,
        }
    }
}

/// A single rendered message. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct Message {
    /// Author role.
    pub role: Role,
    /// Raw text content (markup is resolved at render time).
    pub text: String,
    /// Citations, already capped at [`MAX_CITATIONS`].
    pub citations: Vec<Citation>,
    /// Whether the server consulted web search for this message.
    pub used_search: bool,
    /// Local creation time.
    pub timestamp: DateTime<Local>,
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            citations: Vec::new(),
            used_search: false,
            timestamp: Local::now(),
        }
    }

    /// Create a plain assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            citations: Vec::new(),
            used_search: false,
            timestamp: Local::now(),
        }
    }

    /// Create an assistant message carrying citations.
    fn assistant_reply(text: String, citations: Vec<Citation>, used_search: bool) -> Self {
        Self {
            role: Role::Assistant,
            text,
            citations,
            used_search,
            timestamp: Local::now(),
        }
    }

    /// Time label for display (HH:MM in local time).
    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Token identifying an in-flight request's loading placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PendingToken(String);

impl PendingToken {
    /// The token text (timestamp-derived, unique per session).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What [`Session::begin_send`] hands back for the caller's network task.
#[derive(Debug, Clone)]
pub struct PendingSend {
    /// Placeholder token to pass back to [`Session::finish_send`].
    pub token: PendingToken,
    /// Trimmed message text to post.
    pub message: String,
}

/// One transcript entry.
#[derive(Debug, Clone)]
pub enum Entry {
    /// A user or assistant message.
    Message(Message),
    /// Transient placeholder for an in-flight request.
    Loading {
        /// Token identifying the request this placeholder belongs to.
        token: PendingToken,
    },
}

impl Entry {
    /// The message, if this entry is one.
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(msg) => Some(msg),
            Self::Loading { .. } => None,
        }
    }
}

/// Conversation state: transcript entries plus the mirrored history counter.
#[derive(Debug)]
pub struct Session {
    entries: Vec<Entry>,
    history_length: u64,
    in_flight: u32,
    token_seq: u64,
}

impl Session {
    /// Create a session seeded with the welcome greeting.
    pub fn new() -> Self {
        Self {
            entries: vec![Entry::Message(Message::assistant(WELCOME_MESSAGE))],
            history_length: 0,
            in_flight: 0,
            token_seq: 0,
        }
    }

    /// All transcript entries in chronological order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Rendered messages, skipping loading placeholders.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(Entry::as_message)
    }

    /// Server-reported conversation length (the displayed counter).
    pub fn history_length(&self) -> u64 {
        self.history_length
    }

    /// Whether any request is currently in flight.
    pub fn is_searching(&self) -> bool {
        self.in_flight > 0
    }

    /// The fixed sample-query shortcuts.
    pub fn sample_queries() -> &'static [&'static str] {
        SAMPLE_QUERIES
    }

    /// Start a send: append the user message and a loading placeholder.
    ///
    /// Empty or whitespace-only input is a no-op and returns `None`; the
    /// caller must not issue a request in that case. Otherwise the caller
    /// posts `PendingSend::message` and reports the outcome through
    /// [`Session::finish_send`] with the returned token, exactly once.
    pub fn begin_send(&mut self, input: &str) -> Option<PendingSend> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }

        self.entries.push(Entry::Message(Message::user(message)));
        let token = self.next_token();
        self.entries.push(Entry::Loading {
            token: token.clone(),
        });
        self.in_flight += 1;

        Some(PendingSend {
            token,
            message: message.to_string(),
        })
    }

    /// Complete a send: remove the placeholder and append the outcome.
    ///
    /// Appends the assistant reply on success, or an `"Error: ..."` line
    /// for a server-reported failure or transport error. The counter is
    /// updated from `history_length` when the server provides it.
    pub fn finish_send(
        &mut self,
        token: &PendingToken,
        result: Result<ChatResponse, TransportError>,
    ) {
        self.remove_loading(token);
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(reply) if reply.success => {
                let citations: Vec<Citation> = reply
                    .search_results
                    .unwrap_or_default()
                    .into_iter()
                    .take(MAX_CITATIONS)
                    .map(Citation::from)
                    .collect();
                self.entries.push(Entry::Message(Message::assistant_reply(
                    reply.response.unwrap_or_default(),
                    citations,
                    reply.used_search.unwrap_or(false),
                )));
                if let Some(len) = reply.history_length {
                    self.history_length = len;
                }
            }
            Ok(reply) => {
                let error = reply.error.unwrap_or_else(|| "unknown error".into());
                self.entries
                    .push(Entry::Message(Message::assistant(format!("Error: {error}"))));
            }
            Err(e) => {
                self.entries
                    .push(Entry::Message(Message::assistant(format!("Error: {e}"))));
            }
        }
    }

    /// Remove the loading placeholder for `token`.
    ///
    /// Removing an already-absent token is a silent no-op (a clear may
    /// have pruned it first).
    pub fn remove_loading(&mut self, token: &PendingToken) {
        if let Some(pos) = self.entries.iter().position(
            |entry| matches!(entry, Entry::Loading { token: t } if t == token),
        ) {
            self.entries.remove(pos);
        }
    }

    /// Apply a `/clear` response.
    ///
    /// On `success`, every entry except the first (the welcome greeting)
    /// is removed, including any pending placeholders, and the counter
    /// resets to zero. Returns whether anything was cleared, so the UI
    /// can notify the user. A falsy response leaves everything unchanged.
    pub fn apply_clear(&mut self, response: &ClearResponse) -> bool {
        if !response.success {
            return false;
        }
        self.entries.truncate(1);
        self.history_length = 0;
        true
    }

    fn next_token(&mut self) -> PendingToken {
        // Sequence suffix keeps tokens unique within the same millisecond.
        self.token_seq += 1;
        PendingToken(format!(
            "loading-{}-{}",
            Utc::now().timestamp_millis(),
            self.token_seq
        ))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant_texts(session: &Session) -> Vec<&str> {
        session
            .messages()
            .filter(|m| m.role == Role::Assistant)
            .map(|m| m.text.as_str())
            .collect()
    }

    fn loading_count(session: &Session) -> usize {
        session
            .entries()
            .iter()
            .filter(|e| matches!(e, Entry::Loading { .. }))
            .count()
    }

    #[test]
    fn test_starts_with_welcome_message() {
        let session = Session::new();
        assert_eq!(session.entries().len(), 1);
        let first = session.entries()[0].as_message().unwrap();
        assert_eq!(first.role, Role::Assistant);
        assert_eq!(first.text, WELCOME_MESSAGE);
        assert_eq!(session.history_length(), 0);
    }

    #[test]
    fn test_blank_input_is_a_no_op() {
        let mut session = Session::new();
        assert!(session.begin_send("").is_none());
        assert!(session.begin_send("   \n\t ").is_none());
        assert_eq!(session.entries().len(), 1);
        assert!(!session.is_searching());
    }

    #[test]
    fn test_begin_send_appends_message_and_placeholder() {
        let mut session = Session::new();
        let pending = session.begin_send("  What's the Bitcoin price?  ").unwrap();

        assert_eq!(pending.message, "What's the Bitcoin price?");
        assert_eq!(session.entries().len(), 3); // welcome, user, placeholder
        assert_eq!(loading_count(&session), 1);
        assert!(session.is_searching());

        let user = session.entries()[1].as_message().unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.text, "What's the Bitcoin price?");
    }

    #[test]
    fn test_successful_reply_updates_counter() {
        let mut session = Session::new();
        let pending = session.begin_send("hi").unwrap();
        session.finish_send(&pending.token, Ok(ChatResponse::reply("hello!", 2)));

        assert_eq!(loading_count(&session), 0);
        assert!(!session.is_searching());
        assert_eq!(session.history_length(), 2);
        assert_eq!(assistant_texts(&session), vec![WELCOME_MESSAGE, "hello!"]);
    }

    #[test]
    fn test_counter_unchanged_when_length_absent() {
        let mut session = Session::new();
        let pending = session.begin_send("one").unwrap();
        session.finish_send(&pending.token, Ok(ChatResponse::reply("first", 5)));

        let pending = session.begin_send("two").unwrap();
        let mut reply = ChatResponse::reply("second", 0);
        reply.history_length = None;
        session.finish_send(&pending.token, Ok(reply));

        assert_eq!(session.history_length(), 5);
    }

    #[test]
    fn test_server_failure_renders_error_line() {
        let mut session = Session::new();
        let pending = session.begin_send("hi").unwrap();
        session.finish_send(&pending.token, Ok(ChatResponse::failure("Empty message")));

        assert_eq!(loading_count(&session), 0);
        let texts = assistant_texts(&session);
        assert_eq!(texts.last().unwrap(), &"Error: Empty message");
        // Counter untouched by failures
        assert_eq!(session.history_length(), 0);
    }

    #[test]
    fn test_failure_without_error_text() {
        let mut session = Session::new();
        let pending = session.begin_send("hi").unwrap();
        let mut reply = ChatResponse::failure("x");
        reply.error = None;
        session.finish_send(&pending.token, Ok(reply));

        assert_eq!(
            assistant_texts(&session).last().unwrap(),
            &"Error: unknown error"
        );
    }

    #[test]
    fn test_transport_error_renders_error_line() {
        let mut session = Session::new();
        let pending = session.begin_send("hi").unwrap();
        session.finish_send(
            &pending.token,
            Err(TransportError::Url {
                url: "bad".into(),
                reason: "relative URL without a base".into(),
            }),
        );

        assert_eq!(loading_count(&session), 0);
        let texts = assistant_texts(&session);
        assert!(texts.last().unwrap().starts_with("Error: "));
    }

    #[test]
    fn test_citations_capped_at_three() {
        let results: Vec<SearchResult> = (0..5)
            .map(|i| SearchResult {
                link: format!("https://example.com/{i}"),
                display_link: format!("example.com/{i}"),
            })
            .collect();
        let mut reply = ChatResponse::reply("answer", 1);
        reply.search_results = Some(results);
        reply.used_search = Some(true);

        let mut session = Session::new();
        let pending = session.begin_send("query").unwrap();
        session.finish_send(&pending.token, Ok(reply));

        let last = session.entries().last().unwrap().as_message().unwrap();
        assert_eq!(last.citations.len(), MAX_CITATIONS);
        assert_eq!(last.citations[0].label, "example.com/0");
        assert!(last.used_search);
    }

    #[test]
    fn test_remove_loading_twice_is_silent() {
        let mut session = Session::new();
        let pending = session.begin_send("hi").unwrap();

        session.remove_loading(&pending.token);
        assert_eq!(loading_count(&session), 0);
        session.remove_loading(&pending.token);
        assert_eq!(loading_count(&session), 0);
    }

    #[test]
    fn test_overlapping_sends_resolve_independently() {
        let mut session = Session::new();
        let first = session.begin_send("first").unwrap();
        let second = session.begin_send("second").unwrap();
        assert_ne!(first.token, second.token);
        assert_eq!(loading_count(&session), 2);

        // Completions may arrive out of order
        session.finish_send(&second.token, Ok(ChatResponse::reply("reply two", 4)));
        assert_eq!(loading_count(&session), 1);
        assert!(session.is_searching());

        session.finish_send(&first.token, Ok(ChatResponse::reply("reply one", 4)));
        assert_eq!(loading_count(&session), 0);
        assert!(!session.is_searching());
    }

    #[test]
    fn test_tokens_unique_within_same_millisecond() {
        let mut session = Session::new();
        let tokens: Vec<PendingToken> = (0..50)
            .map(|i| session.begin_send(&format!("msg {i}")).unwrap().token)
            .collect();
        for (i, a) in tokens.iter().enumerate() {
            for b in &tokens[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_clear_keeps_only_welcome() {
        let mut session = Session::new();
        let pending = session.begin_send("hi").unwrap();
        session.finish_send(&pending.token, Ok(ChatResponse::reply("hello", 2)));

        let cleared = session.apply_clear(&ClearResponse { success: true });
        assert!(cleared);
        assert_eq!(session.entries().len(), 1);
        assert_eq!(
            session.entries()[0].as_message().unwrap().text,
            WELCOME_MESSAGE
        );
        assert_eq!(session.history_length(), 0);
    }

    #[test]
    fn test_failed_clear_changes_nothing() {
        let mut session = Session::new();
        let pending = session.begin_send("hi").unwrap();
        session.finish_send(&pending.token, Ok(ChatResponse::reply("hello", 2)));
        let before = session.entries().len();

        let cleared = session.apply_clear(&ClearResponse { success: false });
        assert!(!cleared);
        assert_eq!(session.entries().len(), before);
        assert_eq!(session.history_length(), 2);
    }

    #[test]
    fn test_clear_prunes_pending_placeholder() {
        let mut session = Session::new();
        let pending = session.begin_send("hi").unwrap();
        assert_eq!(loading_count(&session), 1);

        session.apply_clear(&ClearResponse { success: true });
        assert_eq!(loading_count(&session), 0);

        // The late completion still lands without a placeholder to remove
        session.finish_send(&pending.token, Ok(ChatResponse::reply("late", 1)));
        assert_eq!(assistant_texts(&session), vec![WELCOME_MESSAGE, "late"]);
        assert!(!session.is_searching());
    }

    #[test]
    fn test_sample_queries_fixed_list() {
        let samples = Session::sample_queries();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], "What's the current Bitcoin price?");

        // Selecting a sample follows the same flow as a manual send
        let mut session = Session::new();
        let pending = session.begin_send(samples[1]).unwrap();
        assert_eq!(pending.message, samples[1]);
    }
}
