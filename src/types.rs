use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Who produced a chat message.
///
/// `System` messages are generated locally (welcome banner); `Ai` covers
/// backend answers as well as locally generated timeout and error notices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
    System,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai",
            Sender::System => "system",
        }
    }
}

/// One entry in the conversation log. Never mutated after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: OffsetDateTime,
}

// Ids only need to be unique within a running session.
static MESSAGE_SEQ: AtomicU64 = AtomicU64::new(1);

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        let timestamp = OffsetDateTime::now_utc();
        let millis = timestamp.unix_timestamp_nanos() / 1_000_000;
        let seq = MESSAGE_SEQ.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("{millis}-{seq}-{}", sender.as_str()),
            text: text.into(),
            sender,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_for_identical_text() {
        let first = ChatMessage::new(Sender::User, "バッテリーが上がりません");
        let second = ChatMessage::new(Sender::User, "バッテリーが上がりません");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn id_carries_sender_suffix() {
        let message = ChatMessage::new(Sender::Ai, "hello");
        assert!(message.id.ends_with("-ai"));
    }
}
