//! Remote document-store error types

/// Remote result type
pub type Result<T> = std::result::Result<T, Error>;

/// Remote document-store errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Remote store unavailable")]
    Unavailable,

    #[error("Write rejected: {0}")]
    Rejected(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
