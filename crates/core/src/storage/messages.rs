//! Message log storage
//!
//! The log lives under the `Messages` collection as a single JSON array,
//! append-only by construction: appends go through compare-and-swap, so a
//! concurrent append from another handle forces a re-read instead of a
//! lost update.

use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::invariants::{assert_log_invariants, assert_record_invariants};
use crate::models::{MessageDraft, MessageRecord};

use super::{Collection, KvStore};

/// Appends that keep conflicting past this many retries give up
const MAX_APPEND_RETRIES: u32 = 8;

pub struct MessageStore<'a> {
    kv: KvStore<'a>,
}

impl<'a> MessageStore<'a> {
    pub fn new(kv: KvStore<'a>) -> Self {
        Self { kv }
    }

    /// Read the entire message log.
    ///
    /// An absent or malformed stored log reads as empty.
    pub fn load(&self) -> Result<Vec<MessageRecord>> {
        Ok(self.load_versioned()?.0)
    }

    /// Number of records in the log
    pub fn len(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Append one record, assigning the next sequence number.
    ///
    /// Read-modify-write through compare-and-swap: a conflicting writer
    /// triggers a re-read and retry, so no concurrent append is lost.
    pub fn append(&self, draft: MessageDraft) -> Result<MessageRecord> {
        for _ in 0..MAX_APPEND_RETRIES {
            let (records, version) = self.load_versioned()?;
            let seq = records.last().map(|r| r.seq + 1).unwrap_or(1);

            let record = draft.clone().into_record(seq);
            assert_record_invariants(&record);

            let mut docs: Vec<Value> = records
                .into_iter()
                .map(|r| serde_json::to_value(r))
                .collect::<std::result::Result<_, _>>()?;
            docs.push(serde_json::to_value(&record)?);

            match self
                .kv
                .compare_and_swap(Collection::Messages, &Value::Array(docs), version)
            {
                Ok(_) => return Ok(record),
                Err(Error::Conflict(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(Error::Conflict(Collection::Messages.as_str().to_string()))
    }

    fn load_versioned(&self) -> Result<(Vec<MessageRecord>, u64)> {
        let read = self.kv.get(Collection::Messages)?;
        let records = match read.value {
            Value::Null => Vec::new(),
            value => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!(error = %e, "Message log does not decode, treating as empty");
                Vec::new()
            }),
        };
        assert_log_invariants(&records);
        Ok((records, read.version))
    }
}
