//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::identity::ActorIdentity;
use crate::models::{Conversation, MessageRecord};

/// Validate that a stored message record is internally consistent
pub fn assert_record_invariants(record: &MessageRecord) {
    debug_assert!(
        !record.body.trim().is_empty(),
        "Record {} has empty body",
        record.seq
    );

    debug_assert!(
        !record.patient.id.is_empty(),
        "Record {} has empty patient id",
        record.seq
    );

    debug_assert!(
        !record.provider.party().id.is_empty(),
        "Record {} has empty provider id",
        record.seq
    );
}

/// Validate that a loaded log carries strictly increasing sequence numbers
pub fn assert_log_invariants(records: &[MessageRecord]) {
    for pair in records.windows(2) {
        debug_assert!(
            pair[0].seq < pair[1].seq,
            "Log sequence not strictly increasing: {} then {}",
            pair[0].seq,
            pair[1].seq
        );
    }
}

/// Validate a derived conversation against the actor it was built for
pub fn assert_conversation_invariants(conversation: &Conversation, actor: &ActorIdentity) {
    debug_assert!(
        !conversation.is_empty(),
        "Conversation {} derived with no messages",
        conversation.id
    );

    for msg in &conversation.messages {
        let matches = msg
            .party_for(actor.role)
            .map(|p| p.id == actor.id)
            .unwrap_or(false);
        debug_assert!(
            matches,
            "Conversation {} contains record {} not involving actor {}",
            conversation.id,
            msg.seq,
            actor.id
        );
    }

    for pair in conversation.messages.windows(2) {
        debug_assert!(
            (pair[0].sent_at, pair[0].seq) <= (pair[1].sent_at, pair[1].seq),
            "Conversation {} messages out of order at seq {}",
            conversation.id,
            pair[1].seq
        );
    }

    if let Some(last) = conversation.messages.last() {
        debug_assert!(
            conversation.last_at == last.sent_at && conversation.last_message == last.body,
            "Conversation {} summary does not match final message",
            conversation.id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Party, PartyKind, ProviderParty};
    use chrono::Utc;

    fn make_record(seq: u64) -> MessageRecord {
        MessageRecord {
            seq,
            sender: Party::new("p1", "Pat", "a.png"),
            body: "hello".to_string(),
            sent_at: Utc::now(),
            patient: Party::new("p1", "Pat", "a.png"),
            provider: ProviderParty::Doctor(Party::new("d1", "Doc", "d.png")),
        }
    }

    #[test]
    fn test_valid_record() {
        assert_record_invariants(&make_record(1));
    }

    #[test]
    fn test_valid_log() {
        assert_log_invariants(&[make_record(1), make_record(2), make_record(5)]);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    #[cfg(debug_assertions)]
    fn test_duplicate_seq_panics() {
        assert_log_invariants(&[make_record(3), make_record(3)]);
    }

    #[test]
    #[should_panic(expected = "empty body")]
    #[cfg(debug_assertions)]
    fn test_empty_body_panics() {
        let mut record = make_record(1);
        record.body = "   ".to_string();
        assert_record_invariants(&record);
    }
}
