//! Best-effort remote mirroring
//!
//! After a successful local append the record is mirrored to the hosted
//! document store. A remote failure is logged and swallowed: exactly one
//! attempt, no retry, and the operation still counts as successful. The
//! local store is the source of truth.

use std::sync::Arc;

use curalink_core::{Collection, MessageRecord};
use curalink_net::DocumentApi;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct RemoteMirror {
    api: Arc<dyn DocumentApi>,
}

impl RemoteMirror {
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self { api }
    }

    /// Mirror one appended record. Returns whether the remote accepted it.
    pub async fn append(&self, record: &MessageRecord) -> bool {
        let doc = match serde_json::to_value(record) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(seq = record.seq, error = %e, "Could not encode record for mirroring");
                return false;
            }
        };

        match self
            .api
            .add_document(Collection::Messages.as_str(), doc)
            .await
        {
            Ok(id) => {
                debug!(seq = record.seq, remote_id = %id, "Mirrored message");
                true
            }
            Err(e) => {
                warn!(
                    seq = record.seq,
                    error = %e,
                    "Remote write failed, keeping local copy only"
                );
                false
            }
        }
    }

    /// Fire-and-forget mirroring from a synchronous caller.
    /// Must run inside a tokio runtime.
    pub fn spawn_append(&self, record: MessageRecord) {
        let mirror = self.clone();
        tokio::spawn(async move {
            mirror.append(&record).await;
        });
    }
}
