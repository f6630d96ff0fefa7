//! Conversation aggregation
//!
//! Rebuilds per-counterparty threads from the flat message log for one
//! actor. The pass is a pure function of the log and the actor: no hidden
//! state, deterministic output, and it runs in full on every refresh
//! (cost is O(total messages); there is no incremental path).

use std::collections::HashMap;

use crate::identity::ActorIdentity;
use crate::invariants::assert_conversation_invariants;
use crate::models::{Conversation, MessageRecord, Party, PartyKind};

/// Derive the actor's conversation list from the full message log.
///
/// A record belongs to the actor when the actor's canonical id equals the
/// role-appropriate party on the record: the patient side for a Patient
/// actor, the provider side for a Doctor or Pharmacy actor. Each kept
/// record lands in exactly one thread, keyed by the counterparty. A
/// patient therefore gets distinct threads for a doctor and a pharmacy
/// even when both involve the same patient id.
pub fn aggregate(records: &[MessageRecord], actor: &ActorIdentity) -> Vec<Conversation> {
    let mut groups: HashMap<String, Vec<&MessageRecord>> = HashMap::new();

    for record in records {
        let matches = record
            .party_for(actor.role)
            .map(|p| p.id == actor.id)
            .unwrap_or(false);
        if !matches {
            continue;
        }
        let key = counterparty(record, actor.role).0.id.clone();
        groups.entry(key).or_default().push(record);
    }

    let mut conversations: Vec<Conversation> = groups
        .into_iter()
        .map(|(id, mut group)| {
            group.sort_by(|a, b| (a.sent_at, a.seq).cmp(&(b.sent_at, b.seq)));

            // Display metadata comes from the most recent record so a
            // counterparty's profile update is reflected immediately.
            let newest = group[group.len() - 1];
            let (party, kind) = counterparty(newest, actor.role);

            Conversation {
                id,
                name: party.name.clone(),
                avatar: party.avatar.clone(),
                kind,
                messages: group.into_iter().cloned().collect(),
                last_message: newest.body.clone(),
                last_at: newest.sent_at,
            }
        })
        .collect();

    // Most recently active first; ties broken by id for determinism
    conversations.sort_by(|a, b| b.last_at.cmp(&a.last_at).then_with(|| a.id.cmp(&b.id)));

    for conversation in &conversations {
        assert_conversation_invariants(conversation, actor);
    }

    conversations
}

/// The other party of a record relative to the actor's role
fn counterparty(record: &MessageRecord, role: PartyKind) -> (&Party, PartyKind) {
    match role {
        PartyKind::Patient => (record.provider.party(), record.provider.kind()),
        PartyKind::Doctor | PartyKind::Pharmacy => (&record.patient, PartyKind::Patient),
    }
}
