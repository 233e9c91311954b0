use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single chat line. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    text: String,
    sender: Sender,
    sent_at: DateTime<Local>,
}

impl ChatMessage {
    /// Builds a user message from trimmed input, or `None` when it is blank.
    pub fn user(raw: &str) -> Option<Self> {
        let text = raw.trim();
        (!text.is_empty()).then(|| Self::new(text.to_string(), Sender::User))
    }

    /// Builds a bot message, or `None` when the text is blank. Non-blank
    /// text is kept exactly as received.
    pub fn bot(raw: &str) -> Option<Self> {
        (!raw.trim().is_empty()).then(|| Self::new(raw.to_string(), Sender::Bot))
    }

    /// Builds a bot message, substituting `fallback` when `raw` is blank.
    pub fn bot_or(raw: &str, fallback: &'static str) -> Self {
        Self::bot(raw).unwrap_or_else(|| Self::new(fallback.to_string(), Sender::Bot))
    }

    fn new(text: String, sender: Sender) -> Self {
        Self {
            text,
            sender,
            sent_at: Local::now(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn sent_at(&self) -> DateTime<Local> {
        self.sent_at
    }
}

/// Append-only, session-scoped list of chat messages.
///
/// Cloning shares the underlying list; the UI thread reads snapshots while
/// resolution tasks append.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    inner: Arc<Mutex<Vec<ChatMessage>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, message: ChatMessage) {
        log::debug!(
            "📝 {:?}: {}",
            message.sender(),
            message.text().chars().take(50).collect::<String>()
        );
        self.lock().push(message);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of every message so far, oldest first.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        // Appends never leave the list half-written, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_not_a_message() {
        assert!(ChatMessage::user("").is_none());
        assert!(ChatMessage::user("   \n\t").is_none());
        assert!(ChatMessage::bot(" ").is_none());
    }

    #[test]
    fn user_text_is_trimmed() {
        let msg = ChatMessage::user("  hello there \n").unwrap();
        assert_eq!(msg.text(), "hello there");
        assert_eq!(msg.sender(), Sender::User);
    }

    #[test]
    fn bot_text_keeps_its_whitespace() {
        let msg = ChatMessage::bot("  line one\n  indented\n").unwrap();
        assert_eq!(msg.text(), "  line one\n  indented\n");
        assert_eq!(msg.sender(), Sender::Bot);

        let fallback = ChatMessage::bot_or(" \n ", "fallback");
        assert_eq!(fallback.text(), "fallback");
    }

    #[test]
    fn transcript_keeps_insertion_order_across_clones() {
        let transcript = Transcript::new();
        let shared = transcript.clone();

        transcript.push(ChatMessage::user("first").unwrap());
        shared.push(ChatMessage::bot("second").unwrap());
        transcript.push(ChatMessage::user("third").unwrap());

        let texts: Vec<String> = transcript
            .snapshot()
            .iter()
            .map(|m| m.text().to_string())
            .collect();
        assert_eq!(texts, ["first", "second", "third"]);
        assert_eq!(shared.len(), 3);
    }

    #[test]
    fn sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
    }
}
