//! Error taxonomy for the library layers. Validation problems are the only
//! kind expected to reach the UI; storage problems are absorbed by the view
//! model and logged.

use thiserror::Error;

/// Rejected input at the form boundary. Nothing is mutated when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Emoji is required.")]
    EmptySymbol,

    #[error("Description is required.")]
    EmptyDescription,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Failure while reading or writing the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to encode or decode emojis: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
