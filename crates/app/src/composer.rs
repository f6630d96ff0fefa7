//! Outbound message construction
//!
//! Builds the record for one outbound message: the patient side is the
//! actor or the counterparty depending on role, and the single provider
//! side comes from whichever party is the doctor or pharmacy.

use chrono::{DateTime, Utc};
use curalink_core::{
    ActorIdentity, Conversation, Error, MessageDraft, MessageRecord, Party, PartyKind,
    ProviderParty, Result,
};

/// Result of a send attempt. The refusals are quiet no-ops, not errors:
/// nothing is appended and nothing is surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent(MessageRecord),
    /// Text was empty after trimming
    EmptyMessage,
    /// No conversation is selected
    NoConversation,
    /// The current account has no resolvable identity
    NoIdentity,
}

/// Build a draft for `body` sent by `actor` into `conversation`.
///
/// Fails with `InvalidOperation` for pairings the log cannot represent
/// (two patients, or two providers).
pub fn build_draft(
    actor: &ActorIdentity,
    conversation: &Conversation,
    body: String,
    sent_at: DateTime<Utc>,
) -> Result<MessageDraft> {
    let counterparty = Party::new(
        conversation.id.clone(),
        conversation.name.clone(),
        conversation.avatar.clone(),
    );

    let (patient, provider) = match (actor.role, conversation.kind) {
        (PartyKind::Patient, PartyKind::Doctor) => {
            (actor.as_party(), ProviderParty::Doctor(counterparty))
        }
        (PartyKind::Patient, PartyKind::Pharmacy) => {
            (actor.as_party(), ProviderParty::Pharmacy(counterparty))
        }
        (PartyKind::Doctor, PartyKind::Patient) => {
            (counterparty, ProviderParty::Doctor(actor.as_party()))
        }
        (PartyKind::Pharmacy, PartyKind::Patient) => {
            (counterparty, ProviderParty::Pharmacy(actor.as_party()))
        }
        (actor_role, counterparty_kind) => {
            return Err(Error::InvalidOperation(format!(
                "cannot message {} as {}",
                counterparty_kind, actor_role
            )))
        }
    };

    Ok(MessageDraft {
        sender: actor.as_party(),
        body,
        sent_at,
        patient,
        provider,
    })
}
