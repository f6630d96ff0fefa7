//! Curalink Network Library
//!
//! Client seam for the hosted document database backing the marketplace.
//!
//! # Architecture
//!
//! - **DocumentApi**: generic collection read / add / patch operations
//! - **MemoryDocumentApi**: in-memory implementation for tests and
//!   offline development, with an online toggle to exercise failure paths
//!
//! There is no wire protocol here: the remote store is an opaque
//! collaborator with best-effort success, and the local store remains the
//! source of truth when it is unreachable.

pub mod document;
pub mod error;

pub use document::{ApiFuture, DocumentApi, MemoryDocumentApi};
pub use error::{Error, Result};
