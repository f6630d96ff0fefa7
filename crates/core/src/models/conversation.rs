//! Derived conversation threads
//!
//! Conversations are never persisted; they are rebuilt in full from the
//! message log on every aggregation pass.

use chrono::{DateTime, Utc};

use super::{MessageRecord, PartyKind};

/// A derived thread between the current actor and one counterparty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// Canonical id of the counterparty
    pub id: String,
    /// Display name of the counterparty, taken from the most recent record
    pub name: String,
    pub avatar: String,
    /// The counterparty's role from the actor's perspective
    pub kind: PartyKind,
    /// Ascending by (sent_at, seq)
    pub messages: Vec<MessageRecord>,
    pub last_message: String,
    pub last_at: DateTime<Utc>,
}

impl Conversation {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
