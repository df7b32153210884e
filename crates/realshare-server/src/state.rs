//! Shared application state for `RealShare` server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. Building it cannot fail: when no database client
//! can be resolved the submission handler runs in local-only mode.

use std::sync::Arc;

use tracing::info;

use realshare_core::analytics::Analytics;
use realshare_core::handle::DatabaseHandle;
use realshare_core::resolver::{ConfiguredClient, DefaultProjectClient, FixedClient, Resolver};
use realshare_core::submission::SubmissionHandler;
use realshare_storage::MemoryStore;

use crate::config::{ServerConfig, StorageMode};

/// Shared application state passed to all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Early-access form submissions, with the database injected.
    pub submissions: SubmissionHandler,
    /// Analytics client (None if not configured).
    pub analytics: Option<Analytics>,
}

impl AppState {
    /// State from already-resolved parts.
    #[must_use]
    pub fn new(db: Option<DatabaseHandle>, analytics: Option<Analytics>) -> Self {
        Self {
            submissions: SubmissionHandler::new(db),
            analytics,
        }
    }

    /// Resolve the database client and analytics from configuration.
    #[must_use]
    pub fn bootstrap(config: &ServerConfig) -> Self {
        let db = match config.storage {
            StorageMode::Firestore => firestore_resolver(config).resolve_or_offline(),
            StorageMode::Memory => {
                info!("using in-memory storage (signups will not persist)");
                let handle = DatabaseHandle::new(Arc::new(MemoryStore::new()));
                Resolver::new(
                    Arc::new(FixedClient::new(Some(handle))),
                    Arc::new(FixedClient::default()),
                )
                .resolve_or_offline()
            }
            StorageMode::Disabled => {
                info!("storage disabled, signups are acknowledged locally only");
                None
            }
        };

        let analytics = Analytics::initialize(config.firebase.measurement_id());
        Self::new(db, analytics)
    }
}

fn firestore_resolver(config: &ServerConfig) -> Resolver {
    Resolver::new(
        Arc::new(ConfiguredClient::new(
            config.firebase.clone(),
            config.firestore_endpoint.clone(),
        )),
        Arc::new(DefaultProjectClient::new(
            config.default_project.clone(),
            config.firestore_endpoint.clone(),
        )),
    )
}

#[cfg(test)]
mod tests {
    use realshare_core::config::ConfigState;

    use super::*;

    fn config(storage: StorageMode, firebase: ConfigState) -> ServerConfig {
        ServerConfig {
            bind_addr: ([127, 0, 0, 1], 0).into(),
            log_level: "info".to_owned(),
            storage,
            firebase,
            default_project: None,
            firestore_endpoint: None,
        }
    }

    #[test]
    fn memory_mode_has_database() {
        let state = AppState::bootstrap(&config(StorageMode::Memory, ConfigState::Missing));
        assert_eq!(state.submissions.database().map(DatabaseHandle::backend), Some("memory"));
    }

    #[test]
    fn disabled_mode_is_local_only() {
        let state = AppState::bootstrap(&config(StorageMode::Disabled, ConfigState::Missing));
        assert!(state.submissions.database().is_none());
    }

    #[test]
    fn broken_firebase_config_degrades_to_local_only() {
        let state = AppState::bootstrap(&config(
            StorageMode::Firestore,
            ConfigState::Invalid {
                reason: "simulated".to_owned(),
            },
        ));
        assert!(state.submissions.database().is_none());
        assert!(state.analytics.is_none());
    }
}
