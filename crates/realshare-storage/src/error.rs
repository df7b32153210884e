//! Storage error types.
//!
//! Every error variant carries enough context to diagnose the problem
//! without a debugger. Credentials (API keys) never appear in messages.

/// Errors that can occur during document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend could not be constructed from its settings.
    #[error("invalid storage settings: {reason}")]
    InvalidSettings { reason: String },

    /// The collection name is not a valid top-level collection id.
    #[error("invalid collection name '{name}'")]
    InvalidCollection { name: String },

    /// The backend refused the write (permission denied, quota exceeded, ...).
    #[error("write to '{collection}' rejected with status {status}: {reason}")]
    Rejected {
        collection: String,
        status: u16,
        reason: String,
    },

    /// The backend could not be reached or failed internally.
    #[error("storage backend unavailable while writing to '{collection}': {reason}")]
    Unavailable { collection: String, reason: String },
}
