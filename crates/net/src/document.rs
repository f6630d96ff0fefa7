//! Remote document-collection client seam
//!
//! The hosted document database is an opaque external collaborator: named
//! collections of JSON documents with whole-document reads and per-document
//! writes. Callers treat success as best-effort; durability policy lives on
//! the calling side.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Boxed future type for client operations
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Generic document-collection operations
pub trait DocumentApi: Send + Sync {
    /// Fetch every document in a collection
    fn get(&self, collection: &str) -> ApiFuture<'_, Result<Vec<Value>>>;

    /// Add one document; returns the assigned document id
    fn add_document(&self, collection: &str, doc: Value) -> ApiFuture<'_, Result<String>>;

    /// Patch one document by id (shallow merge of top-level fields)
    fn update_document(&self, collection: &str, id: &str, patch: Value)
        -> ApiFuture<'_, Result<()>>;
}

/// In-memory implementation for tests and offline development.
///
/// The `online` toggle simulates remote unavailability: while offline every
/// call fails with [`Error::Unavailable`].
pub struct MemoryDocumentApi {
    collections: Mutex<HashMap<String, Vec<(String, Value)>>>,
    online: AtomicBool,
}

impl MemoryDocumentApi {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            online: AtomicBool::new(true),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::Unavailable)
        }
    }
}

impl Default for MemoryDocumentApi {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentApi for MemoryDocumentApi {
    fn get(&self, collection: &str) -> ApiFuture<'_, Result<Vec<Value>>> {
        let collection = collection.to_string();
        Box::pin(async move {
            self.check_online()?;
            let collections = self.collections.lock().await;
            Ok(collections
                .get(&collection)
                .map(|docs| docs.iter().map(|(_, doc)| doc.clone()).collect())
                .unwrap_or_default())
        })
    }

    fn add_document(&self, collection: &str, doc: Value) -> ApiFuture<'_, Result<String>> {
        let collection = collection.to_string();
        Box::pin(async move {
            self.check_online()?;
            let id = Uuid::new_v4().to_string();
            let mut collections = self.collections.lock().await;
            collections
                .entry(collection)
                .or_default()
                .push((id.clone(), doc));
            Ok(id)
        })
    }

    fn update_document(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> ApiFuture<'_, Result<()>> {
        let collection = collection.to_string();
        let id = id.to_string();
        Box::pin(async move {
            self.check_online()?;
            let mut collections = self.collections.lock().await;
            let docs = collections
                .get_mut(&collection)
                .ok_or_else(|| Error::NotFound(id.clone()))?;
            let doc = docs
                .iter_mut()
                .find(|(doc_id, _)| *doc_id == id)
                .map(|(_, doc)| doc)
                .ok_or_else(|| Error::NotFound(id.clone()))?;

            match (doc, patch) {
                (Value::Object(existing), Value::Object(fields)) => {
                    for (key, value) in fields {
                        existing.insert(key, value);
                    }
                    Ok(())
                }
                (doc, patch) => {
                    *doc = patch;
                    Ok(())
                }
            }
        })
    }
}
