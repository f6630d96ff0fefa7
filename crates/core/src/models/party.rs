//! Marketplace party identities

use serde::{Deserialize, Serialize};

/// The three kinds of party on the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyKind {
    Patient,
    Doctor,
    Pharmacy,
}

impl PartyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Doctor => "Doctor",
            Self::Pharmacy => "Pharmacy",
        }
    }

    /// Placeholder avatar used when neither the account nor the
    /// role profile carries a picture
    pub fn default_avatar(&self) -> &'static str {
        match self {
            Self::Patient => "assets/avatars/patient.png",
            Self::Doctor => "assets/avatars/doctor.png",
            Self::Pharmacy => "assets/avatars/pharmacy.png",
        }
    }
}

impl std::fmt::Display for PartyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a two-party exchange as stored on a message record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Canonical identifier (see `identity::canonical_id`)
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl Party {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}
