//! Shared handle to the document database.

use std::sync::Arc;

use realshare_storage::{DocumentStore, Fields, StorageError};

/// Capability to write documents to the signup database.
///
/// Obtained once at startup and shared read-only; cloning only bumps a
/// reference count. Absence of a handle (`Option::None`) means the page runs
/// in local-only mode.
#[derive(Clone)]
pub struct DatabaseHandle {
    store: Arc<dyn DocumentStore>,
}

impl DatabaseHandle {
    /// Wrap a document store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Name of the backend behind this handle.
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Append a document to `collection`.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`StorageError`].
    pub async fn add(&self, collection: &str, fields: Fields) -> Result<String, StorageError> {
        self.store.add(collection, fields).await
    }
}

impl std::fmt::Debug for DatabaseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseHandle")
            .field("backend", &self.backend())
            .finish_non_exhaustive()
    }
}
