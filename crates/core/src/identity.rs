//! Identity resolution
//!
//! Determines the current actor from the `CurrentUser` account document.
//! Identifiers are canonicalized (trimmed, ASCII-lowercased) once at this
//! boundary; everything downstream compares canonical ids with plain
//! string equality.

use crate::models::{Account, Party, PartyKind};

/// The resolved current actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorIdentity {
    pub role: PartyKind,
    /// Canonical identifier: email, else role-profile email, else name
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl ActorIdentity {
    /// The actor as a message-record party
    pub fn as_party(&self) -> Party {
        Party::new(self.id.clone(), self.name.clone(), self.avatar.clone())
    }
}

/// Canonical form of an identifier: trimmed and ASCII-lowercased.
/// Returns None for values that are empty after trimming.
pub fn canonical_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_lowercase())
    }
}

/// Resolve the current actor from an account document.
///
/// Returns None when no identity candidate exists. That is not an error:
/// downstream aggregation simply yields zero conversations and the
/// composer refuses to send.
pub fn resolve(account: &Account) -> Option<ActorIdentity> {
    let profile = account.role_profile();

    let id = account
        .email
        .as_deref()
        .and_then(canonical_id)
        .or_else(|| {
            profile
                .and_then(|p| p.email.as_deref())
                .and_then(canonical_id)
        })
        .or_else(|| account.name.as_deref().and_then(canonical_id))?;

    let name = profile
        .and_then(|p| p.name.clone())
        .or_else(|| account.name.clone())
        .unwrap_or_else(|| id.clone());

    let avatar = account
        .avatar
        .clone()
        .or_else(|| profile.and_then(|p| p.avatar.clone()))
        .unwrap_or_else(|| account.role.default_avatar().to_string());

    Some(ActorIdentity {
        role: account.role,
        id,
        name,
        avatar,
    })
}
