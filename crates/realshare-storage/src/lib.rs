//! Document store abstraction for `RealShare`.
//!
//! This crate defines the [`DocumentStore`] trait — an append-only document
//! interface that knows nothing about signups, forms, or pages. The core
//! crate wraps a store in a `DatabaseHandle` and decides what gets written.
//!
//! Two implementations are provided:
//!
//! - [`FirestoreBackend`] — production default, talks to the Firestore REST
//!   API (feature `firestore-backend`)
//! - [`MemoryStore`] — in-memory, for development and tests

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

mod error;
#[cfg(feature = "firestore-backend")]
mod firestore;
mod memory;

pub use error::StorageError;
#[cfg(feature = "firestore-backend")]
pub use firestore::{DEFAULT_ENDPOINT, FirestoreBackend, FirestoreSettings};
pub use memory::{MemoryStore, StoredDocument};

/// Field name to value mapping for a single document.
pub type Fields = BTreeMap<String, FieldValue>;

/// A single field value in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// UTF-8 string.
    String(String),
    /// Client-supplied timestamp.
    Timestamp(DateTime<Utc>),
    /// Placeholder the backend replaces with its own clock at commit time.
    ServerTimestamp,
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// An append-only document store.
///
/// Documents are grouped into flat collections (e.g. `earlyAccess`).
/// Backends generate ids client-side with [`new_document_id`] so a write is
/// a single create call.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Create a new document in `collection` and return its id.
    ///
    /// [`FieldValue::ServerTimestamp`] fields are resolved by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidCollection`] for a malformed collection
    /// name, [`StorageError::Rejected`] when the backend refuses the write,
    /// and [`StorageError::Unavailable`] when it cannot be reached.
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StorageError>;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Generate a random document id (32 lowercase hex characters).
#[must_use]
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Check that `name` can be used as a top-level collection id.
///
/// # Errors
///
/// Returns [`StorageError::InvalidCollection`] if the name is empty or
/// contains a path separator.
pub fn validate_collection(name: &str) -> Result<(), StorageError> {
    if name.is_empty() || name.contains('/') {
        return Err(StorageError::InvalidCollection {
            name: name.to_owned(),
        });
    }
    Ok(())
}
