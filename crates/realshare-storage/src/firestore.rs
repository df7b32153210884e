//! Firestore storage backend — the production default.
//!
//! Talks to the Firestore REST API with `reqwest`. Each [`DocumentStore::add`]
//! is a single `documents:commit` call carrying one create-only write, so a
//! document is either fully committed or not at all. Server timestamps are
//! sent as `REQUEST_TIME` field transforms and resolved by Firestore.
//!
//! Pointing [`FirestoreSettings::endpoint`] at `http://localhost:8080` talks
//! to the local Firestore emulator instead.

use std::time::Duration;

use chrono::SecondsFormat;
use serde_json::{Map, Value, json};

use crate::{DocumentStore, FieldValue, Fields, StorageError, new_document_id, validate_collection};

/// Public Firestore REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com";

/// Settings for a [`FirestoreBackend`].
#[derive(Clone)]
pub struct FirestoreSettings {
    /// Google Cloud project id (e.g. `realshare-landing`).
    pub project_id: String,
    /// Database id inside the project.
    pub database: String,
    /// Web API key, sent as the `key` query parameter.
    pub api_key: Option<String>,
    /// Base URL of the REST API.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl FirestoreSettings {
    /// Settings for the default database of `project_id` on the public endpoint.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: "(default)".to_owned(),
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Attach a web API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Use a different REST endpoint (emulator, test server).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl std::fmt::Debug for FirestoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreSettings")
            .field("project_id", &self.project_id)
            .field("database", &self.database)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A document store backed by the Firestore REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct FirestoreBackend {
    client: reqwest::Client,
    settings: FirestoreSettings,
}

impl std::fmt::Debug for FirestoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreBackend")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl FirestoreBackend {
    /// Build a backend from settings. No network call is made.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidSettings`] if the project id or endpoint
    /// is malformed, or the HTTP client cannot be built.
    pub fn new(settings: FirestoreSettings) -> Result<Self, StorageError> {
        let project_ok = !settings.project_id.is_empty()
            && settings
                .project_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !project_ok {
            return Err(StorageError::InvalidSettings {
                reason: format!("invalid project id '{}'", settings.project_id),
            });
        }
        if !settings.endpoint.starts_with("http://") && !settings.endpoint.starts_with("https://") {
            return Err(StorageError::InvalidSettings {
                reason: format!("endpoint '{}' is not an http(s) URL", settings.endpoint),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| StorageError::InvalidSettings {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, settings })
    }

    fn commit_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents:commit",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.project_id,
            self.settings.database,
        )
    }

    fn document_name(&self, collection: &str, id: &str) -> String {
        format!(
            "projects/{}/databases/{}/documents/{collection}/{id}",
            self.settings.project_id, self.settings.database,
        )
    }

    /// Build the `documents:commit` body for a single create-only write.
    fn commit_body(&self, collection: &str, id: &str, fields: Fields) -> Value {
        let mut values = Map::new();
        let mut transforms = Vec::new();

        for (name, value) in fields {
            match value {
                FieldValue::String(s) => {
                    values.insert(name, json!({ "stringValue": s }));
                }
                FieldValue::Timestamp(ts) => {
                    let ts = ts.to_rfc3339_opts(SecondsFormat::Micros, true);
                    values.insert(name, json!({ "timestampValue": ts }));
                }
                FieldValue::ServerTimestamp => {
                    transforms.push(json!({
                        "fieldPath": field_path(&name),
                        "setToServerValue": "REQUEST_TIME",
                    }));
                }
            }
        }

        json!({
            "writes": [{
                "update": {
                    "name": self.document_name(collection, id),
                    "fields": values,
                },
                "updateTransforms": transforms,
                "currentDocument": { "exists": false },
            }]
        })
    }
}

#[async_trait::async_trait]
impl DocumentStore for FirestoreBackend {
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StorageError> {
        validate_collection(collection)?;

        let id = new_document_id();
        let body = self.commit_body(collection, &id, fields);

        let mut request = self.client.post(self.commit_url()).json(&body);
        if let Some(key) = &self.settings.api_key {
            request = request.query(&[("key", key)]);
        }

        // `without_url` keeps the API key out of error messages.
        let response = request.send().await.map_err(|e| StorageError::Unavailable {
            collection: collection.to_owned(),
            reason: e.without_url().to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(collection, document_id = %id, "firestore commit succeeded");
            return Ok(id);
        }

        let reason = error_message(response).await;
        if status.is_server_error() {
            Err(StorageError::Unavailable {
                collection: collection.to_owned(),
                reason: format!("{status}: {reason}"),
            })
        } else {
            Err(StorageError::Rejected {
                collection: collection.to_owned(),
                status: status.as_u16(),
                reason,
            })
        }
    }

    fn backend_name(&self) -> &'static str {
        "firestore"
    }
}

/// Pull `error.message` out of a Firestore error body, if there is one.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_owned())
}

/// Quote a field name with backticks unless it is a simple identifier.
fn field_path(name: &str) -> String {
    let mut chars = name.chars();
    let simple = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        name.to_owned()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}
