//! In-memory document store.
//!
//! Stores documents in a `BTreeMap` keyed by collection behind a `RwLock`.
//! Not persistent — all data is lost when the process exits. Used for local
//! development (`REALSHARE_STORAGE=memory`) and as a real store in tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{DocumentStore, FieldValue, Fields, StorageError, new_document_id, validate_collection};

/// A document as it was committed, with server timestamps resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// Generated document id.
    pub id: String,
    /// Committed fields. Never contains [`FieldValue::ServerTimestamp`].
    pub fields: Fields,
}

impl StoredDocument {
    /// Return a string field by name.
    #[must_use]
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// An in-memory document store.
///
/// Thread-safe and async-compatible. Clones share the same data, so a test
/// can hand one clone to the code under test and inspect another.
///
/// # Examples
///
/// ```
/// # use realshare_storage::{DocumentStore, Fields, MemoryStore};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let mut fields = Fields::new();
/// fields.insert("email".to_owned(), "a@b.com".into());
/// store.add("earlyAccess", fields).await.unwrap();
/// assert_eq!(store.documents("earlyAccess").await.len(), 1);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<BTreeMap<String, Vec<StoredDocument>>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every document in `collection`, in insertion order.
    pub async fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StorageError> {
        validate_collection(collection)?;

        let now = Utc::now();
        let fields = fields
            .into_iter()
            .map(|(name, value)| match value {
                FieldValue::ServerTimestamp => (name, FieldValue::Timestamp(now)),
                other => (name, other),
            })
            .collect();

        let id = new_document_id();
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
