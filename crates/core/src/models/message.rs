//! Message record model
//!
//! The message log is flat and append-only: every record is a two-party
//! exchange between a patient and a provider (doctor or pharmacy).
//! Provider-to-provider messages are not representable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Party, PartyKind};

/// The provider side of a record. Exactly one of doctor/pharmacy is
/// present per record, enforced by the type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderParty {
    Doctor(Party),
    Pharmacy(Party),
}

impl ProviderParty {
    pub fn party(&self) -> &Party {
        match self {
            Self::Doctor(p) | Self::Pharmacy(p) => p,
        }
    }

    pub fn kind(&self) -> PartyKind {
        match self {
            Self::Doctor(_) => PartyKind::Doctor,
            Self::Pharmacy(_) => PartyKind::Pharmacy,
        }
    }
}

/// One immutable entry in the message log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    /// Store-assigned sequence number, strictly increasing within the log
    pub seq: u64,
    pub sender: Party,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub patient: Party,
    pub provider: ProviderParty,
}

/// A record as built by the composer, before the store assigns `seq`
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub sender: Party,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub patient: Party,
    pub provider: ProviderParty,
}

impl MessageDraft {
    pub fn into_record(self, seq: u64) -> MessageRecord {
        MessageRecord {
            seq,
            sender: self.sender,
            body: self.body,
            sent_at: self.sent_at,
            patient: self.patient,
            provider: self.provider,
        }
    }
}

impl MessageRecord {
    /// The party on this record matching the given role, if any
    pub fn party_for(&self, kind: PartyKind) -> Option<&Party> {
        match kind {
            PartyKind::Patient => Some(&self.patient),
            PartyKind::Doctor | PartyKind::Pharmacy => {
                (self.provider.kind() == kind).then(|| self.provider.party())
            }
        }
    }
}
