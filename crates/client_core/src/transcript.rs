use chrono::Utc;

use shared::domain::{Message, Role, SeqNo};

/// Append-only log of exchanged messages. Sequence numbers are assigned
/// here and only here: previous max + 1, starting at 0. Entries are never
/// mutated or removed.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    entries: Vec<Message>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, text: impl Into<String>) -> Message {
        let seq = self
            .entries
            .last()
            .map(|last| last.seq.next())
            .unwrap_or(SeqNo(0));
        let message = Message {
            seq,
            role,
            text: text.into(),
            sent_at: Utc::now(),
        };
        self.entries.push(message.clone());
        message
    }

    /// Snapshot in append order.
    pub fn all(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
