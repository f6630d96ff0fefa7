//! Current-user document storage

use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::models::Account;

use super::{Collection, KvStore};

pub struct AccountStore<'a> {
    kv: KvStore<'a>,
}

impl<'a> AccountStore<'a> {
    pub fn new(kv: KvStore<'a>) -> Self {
        Self { kv }
    }

    /// Load the logged-in account, if any.
    ///
    /// An absent or malformed document reads as no account.
    pub fn load(&self) -> Result<Option<Account>> {
        let read = self.kv.get(Collection::CurrentUser)?;
        let account = match read.value {
            Value::Null => None,
            value => serde_json::from_value(value)
                .map(Some)
                .unwrap_or_else(|e| {
                    warn!(error = %e, "CurrentUser document does not decode, treating as signed out");
                    None
                }),
        };
        Ok(account)
    }

    /// Replace the logged-in account document
    pub fn save(&self, account: &Account) -> Result<()> {
        let doc = serde_json::to_value(account)?;
        self.kv.put(Collection::CurrentUser, &doc)?;
        Ok(())
    }

    /// Remove the logged-in account document
    pub fn clear(&self) -> Result<()> {
        self.kv.put(Collection::CurrentUser, &Value::Null)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PartyKind, RoleProfile};
    use crate::storage::Database;

    #[test]
    fn test_no_account_by_default() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.account().load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_clear() {
        let db = Database::open_in_memory().unwrap();

        let mut account = Account::new(PartyKind::Doctor);
        account.email = Some("doc@mail.com".to_string());
        account.doctor_profile = Some(RoleProfile {
            name: Some("Dr. Sato".to_string()),
            ..Default::default()
        });

        db.account().save(&account).unwrap();
        assert_eq!(db.account().load().unwrap(), Some(account));

        db.account().clear().unwrap();
        assert!(db.account().load().unwrap().is_none());
    }

    #[test]
    fn test_malformed_account_reads_as_signed_out() {
        let db = Database::open_in_memory().unwrap();
        db.kv()
            .put(Collection::CurrentUser, &serde_json::json!(["wrong", "shape"]))
            .unwrap();
        assert!(db.account().load().unwrap().is_none());
    }
}
