//! Account model
//!
//! Mirrors the `CurrentUser` document: a role plus an optional role-specific
//! profile sub-object. Every identity field is optional; the identity
//! resolver applies the fallback chain.

use serde::{Deserialize, Serialize};

use super::PartyKind;

/// Role-specific profile sub-object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleProfile {
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

/// The logged-in actor as persisted under `CurrentUser`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub role: PartyKind,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub patient_profile: Option<RoleProfile>,
    pub doctor_profile: Option<RoleProfile>,
    pub pharmacy_profile: Option<RoleProfile>,
}

impl Account {
    pub fn new(role: PartyKind) -> Self {
        Self {
            role,
            email: None,
            name: None,
            avatar: None,
            patient_profile: None,
            doctor_profile: None,
            pharmacy_profile: None,
        }
    }

    /// The profile sub-object matching the account's own role
    pub fn role_profile(&self) -> Option<&RoleProfile> {
        match self.role {
            PartyKind::Patient => self.patient_profile.as_ref(),
            PartyKind::Doctor => self.doctor_profile.as_ref(),
            PartyKind::Pharmacy => self.pharmacy_profile.as_ref(),
        }
    }
}
