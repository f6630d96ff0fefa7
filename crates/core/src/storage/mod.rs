//! Local document storage for Curalink
//!
//! The persisted layout mirrors the marketplace's document-store
//! conventions: a handful of named collections, each one JSON document,
//! accessed whole. SQLite is the durable backing; one row per collection.

mod account;
mod kv;
mod messages;
mod migrations;

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::instrument;

use crate::error::{Error, Result};

pub use account::AccountStore;
pub use kv::{KvStore, VersionedValue};
pub use messages::MessageStore;

/// The named collections shared across the marketplace views.
///
/// Messaging owns `Messages` and `CurrentUser`; the rest are carried as
/// change-bus topics and generic document access for their own views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Messages,
    CurrentUser,
    Cart,
    Notifications,
    Prescriptions,
    Users,
    PatientNotes,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Messages => "Messages",
            Self::CurrentUser => "CurrentUser",
            Self::Cart => "Cart",
            Self::Notifications => "Notifications",
            Self::Prescriptions => "Prescriptions",
            Self::Users => "Users",
            Self::PatientNotes => "PatientNotes",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Default on-disk location for the local store
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("dev", "curalink", "curalink").ok_or_else(
            || {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine data directory",
                ))
            },
        )?;
        Ok(dirs.data_dir().join("curalink.db"))
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA busy_timeout = 5000")?;
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get::<_, Option<u32>>(0)
            })
            .ok()
            .flatten()
            .unwrap_or(0)
    }

    /// Generic versioned collection access
    pub fn kv(&self) -> KvStore<'_> {
        KvStore::new(&self.conn)
    }

    /// Get message log store
    pub fn messages(&self) -> MessageStore<'_> {
        MessageStore::new(self.kv())
    }

    /// Get current-user document store
    pub fn account(&self) -> AccountStore<'_> {
        AccountStore::new(self.kv())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_applies_schema() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version() >= 1);
    }

    #[test]
    fn test_collection_names_match_persisted_layout() {
        assert_eq!(Collection::Messages.as_str(), "Messages");
        assert_eq!(Collection::CurrentUser.as_str(), "CurrentUser");
        assert_eq!(Collection::PatientNotes.as_str(), "PatientNotes");
    }
}
