//! Versioned key-value collection access
//!
//! Each logical collection is one JSON document in a single row. Two write
//! primitives exist side by side:
//!
//! - [`KvStore::put`] replaces the document unconditionally. This is the
//!   legacy whole-document read-modify-write pattern: two writers that both
//!   read before either writes will silently lose one update
//!   (last-write-wins on the whole collection).
//! - [`KvStore::compare_and_swap`] only writes when the document version
//!   has not moved since the read, failing with [`Error::Conflict`]
//!   otherwise. Appenders use this path and retry.

use rusqlite::{params, Connection};
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

use super::Collection;

/// A collection document paired with its version counter
#[derive(Debug, Clone)]
pub struct VersionedValue {
    pub value: Value,
    pub version: u64,
}

pub struct KvStore<'a> {
    conn: &'a Connection,
}

impl<'a> KvStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Read a collection document.
    ///
    /// An absent row yields JSON `null` at version 0. A stored value that
    /// fails to parse is logged and likewise treated as `null`: corruption
    /// degrades to an empty collection, never a crash.
    pub fn get(&self, collection: Collection) -> Result<VersionedValue> {
        let row = self
            .conn
            .query_row(
                "SELECT version, value FROM collections WHERE name = ?1",
                params![collection.as_str()],
                |row| {
                    let version: i64 = row.get(0)?;
                    let raw: String = row.get(1)?;
                    Ok((version as u64, raw))
                },
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                e => Err(e),
            })?;

        match row {
            None => Ok(VersionedValue {
                value: Value::Null,
                version: 0,
            }),
            Some((version, raw)) => {
                let value = serde_json::from_str(&raw).unwrap_or_else(|e| {
                    warn!(
                        collection = collection.as_str(),
                        error = %e,
                        "Stored value is not valid JSON, treating as empty"
                    );
                    Value::Null
                });
                Ok(VersionedValue { value, version })
            }
        }
    }

    /// Replace a collection document unconditionally (last-write-wins).
    /// Returns the new version.
    pub fn put(&self, collection: Collection, value: &Value) -> Result<u64> {
        let raw = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO collections (name, version, value) VALUES (?1, 1, ?2)
             ON CONFLICT(name) DO UPDATE SET
                version = collections.version + 1,
                value = excluded.value",
            params![collection.as_str(), raw],
        )?;
        self.version(collection)
    }

    /// Replace a collection document only if its version still equals
    /// `expected`. Returns the new version, or [`Error::Conflict`] when
    /// another writer got there first.
    pub fn compare_and_swap(
        &self,
        collection: Collection,
        value: &Value,
        expected: u64,
    ) -> Result<u64> {
        let raw = serde_json::to_string(value)?;

        let changed = if expected == 0 {
            self.conn.execute(
                "INSERT INTO collections (name, version, value) VALUES (?1, 1, ?2)
                 ON CONFLICT(name) DO NOTHING",
                params![collection.as_str(), raw],
            )?
        } else {
            self.conn.execute(
                "UPDATE collections SET version = version + 1, value = ?2
                 WHERE name = ?1 AND version = ?3",
                params![collection.as_str(), raw, expected as i64],
            )?
        };

        if changed == 1 {
            Ok(expected + 1)
        } else {
            Err(Error::Conflict(collection.as_str().to_string()))
        }
    }

    fn version(&self, collection: Collection) -> Result<u64> {
        let version: i64 = self.conn.query_row(
            "SELECT version FROM collections WHERE name = ?1",
            params![collection.as_str()],
            |row| row.get(0),
        )?;
        Ok(version as u64)
    }
}
