//! Curalink Core Library
//!
//! Models, local document storage, identity resolution, conversation
//! aggregation, and the storage change bus for the Curalink marketplace
//! messaging core.

pub mod aggregate;
pub mod bus;
pub mod error;
pub mod identity;
pub mod invariants;
pub mod models;
pub mod storage;

pub use aggregate::aggregate;
pub use bus::{ChangeBus, StorageEvent};
pub use error::{Error, Result};
pub use identity::{canonical_id, resolve, ActorIdentity};
pub use models::*;
pub use storage::{AccountStore, Collection, Database, KvStore, MessageStore, VersionedValue};
