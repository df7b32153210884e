//! Error types for `realshare-core`.
//!
//! Initialization errors never include the Firebase API key, only the name
//! of the offending field or the backend's own (redacted) message.

use realshare_storage::StorageError;

/// Errors from obtaining a database client at startup.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// A required Firebase config field is missing or blank.
    #[error("firebase config is missing required field '{field}'")]
    MissingField { field: &'static str },

    /// The Firebase config could not be loaded at all.
    #[error("firebase config failed to load: {reason}")]
    InvalidConfig { reason: String },

    /// The storage backend could not be constructed.
    #[error("database client construction failed: {0}")]
    Backend(#[from] StorageError),

    /// The source needs a backend that was compiled out.
    #[error("database backend '{backend}' is not enabled in this build")]
    BackendDisabled { backend: &'static str },

    /// Neither the primary nor the fallback path produced a handle.
    #[error("no database client available (primary: {primary}; fallback: {fallback})")]
    Unavailable { primary: String, fallback: String },
}
