//! Startup resolution of the database client.
//!
//! A [`Resolver`] tries a primary [`ClientSource`] and then a fallback. It
//! reports failure as an [`InitError`]; the caller decides whether to degrade
//! to local-only mode with [`Resolver::resolve_or_offline`]. Nothing here can
//! stop the landing page from being served.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::ConfigState;
use crate::error::InitError;
use crate::handle::DatabaseHandle;

/// One way of obtaining a database handle.
///
/// `Ok(None)` means the source has nothing to offer (e.g. not configured);
/// `Err` means it tried and failed.
pub trait ClientSource: Send + Sync {
    /// Short description for logs.
    fn describe(&self) -> &'static str;

    /// Try to produce a handle.
    ///
    /// # Errors
    ///
    /// Returns an [`InitError`] if the source is configured but unusable.
    fn acquire(&self) -> Result<Option<DatabaseHandle>, InitError>;
}

/// Primary source: the client built from the explicit Firebase web config.
#[derive(Debug, Clone)]
pub struct ConfiguredClient {
    config: ConfigState,
    endpoint: Option<String>,
}

impl ConfiguredClient {
    /// Source for the given config. `endpoint` overrides the public
    /// Firestore URL (emulator).
    #[must_use]
    pub fn new(config: ConfigState, endpoint: Option<String>) -> Self {
        Self { config, endpoint }
    }
}

impl ClientSource for ConfiguredClient {
    fn describe(&self) -> &'static str {
        "configured firebase client"
    }

    fn acquire(&self) -> Result<Option<DatabaseHandle>, InitError> {
        let config = match &self.config {
            ConfigState::Missing => return Ok(None),
            ConfigState::Invalid { reason } => {
                return Err(InitError::InvalidConfig {
                    reason: reason.clone(),
                });
            }
            ConfigState::Loaded(config) => config,
        };
        config.validate()?;
        firestore_handle(&config.project_id, Some(&config.api_key), self.endpoint.as_deref())
            .map(Some)
    }
}

/// Fallback source: the default database of the ambient project.
///
/// Needs only a project id (e.g. `GOOGLE_CLOUD_PROJECT`), which is enough
/// for the Firestore emulator or a project whose rules allow keyless writes.
#[derive(Debug, Clone)]
pub struct DefaultProjectClient {
    project_id: Option<String>,
    endpoint: Option<String>,
}

impl DefaultProjectClient {
    /// Source for `project_id`, if one is known.
    #[must_use]
    pub fn new(project_id: Option<String>, endpoint: Option<String>) -> Self {
        Self {
            project_id: project_id.filter(|p| !p.trim().is_empty()),
            endpoint,
        }
    }
}

impl ClientSource for DefaultProjectClient {
    fn describe(&self) -> &'static str {
        "default project client"
    }

    fn acquire(&self) -> Result<Option<DatabaseHandle>, InitError> {
        match &self.project_id {
            Some(project_id) => {
                firestore_handle(project_id, None, self.endpoint.as_deref()).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// A source that hands out an already-built handle, or nothing.
///
/// Used for the in-memory development store and for running with storage
/// switched off.
#[derive(Debug, Clone, Default)]
pub struct FixedClient {
    handle: Option<DatabaseHandle>,
}

impl FixedClient {
    /// Source that always yields `handle`.
    #[must_use]
    pub fn new(handle: Option<DatabaseHandle>) -> Self {
        Self { handle }
    }
}

impl ClientSource for FixedClient {
    fn describe(&self) -> &'static str {
        "fixed client"
    }

    fn acquire(&self) -> Result<Option<DatabaseHandle>, InitError> {
        Ok(self.handle.clone())
    }
}

#[cfg(feature = "firestore")]
fn firestore_handle(
    project_id: &str,
    api_key: Option<&str>,
    endpoint: Option<&str>,
) -> Result<DatabaseHandle, InitError> {
    use realshare_storage::{FirestoreBackend, FirestoreSettings};

    let mut settings = FirestoreSettings::new(project_id);
    if let Some(key) = api_key {
        settings = settings.with_api_key(key);
    }
    if let Some(endpoint) = endpoint {
        settings = settings.with_endpoint(endpoint);
    }
    let backend = FirestoreBackend::new(settings)?;
    Ok(DatabaseHandle::new(Arc::new(backend)))
}

#[cfg(not(feature = "firestore"))]
fn firestore_handle(
    _project_id: &str,
    _api_key: Option<&str>,
    _endpoint: Option<&str>,
) -> Result<DatabaseHandle, InitError> {
    Err(InitError::BackendDisabled {
        backend: "firestore",
    })
}

/// Obtains the database handle at startup: primary source first, then the
/// fallback.
pub struct Resolver {
    primary: Arc<dyn ClientSource>,
    fallback: Arc<dyn ClientSource>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("primary", &self.primary.describe())
            .field("fallback", &self.fallback.describe())
            .finish()
    }
}

impl Resolver {
    /// Resolver over a primary and a fallback source.
    #[must_use]
    pub fn new(primary: Arc<dyn ClientSource>, fallback: Arc<dyn ClientSource>) -> Self {
        Self { primary, fallback }
    }

    /// Try the primary source, then the fallback.
    ///
    /// The fallback is tried both when the primary has nothing to offer and
    /// when it fails.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::Unavailable`] with both reasons when neither
    /// source produces a handle.
    pub fn resolve(&self) -> Result<DatabaseHandle, InitError> {
        let primary = match self.primary.acquire() {
            Ok(Some(handle)) => {
                debug!(
                    source = self.primary.describe(),
                    backend = handle.backend(),
                    "database client resolved"
                );
                return Ok(handle);
            }
            Ok(None) => "not configured".to_owned(),
            Err(e) => {
                warn!(
                    source = self.primary.describe(),
                    error = %e,
                    "primary database client failed, trying fallback"
                );
                e.to_string()
            }
        };

        let fallback = match self.fallback.acquire() {
            Ok(Some(handle)) => {
                info!(
                    source = self.fallback.describe(),
                    backend = handle.backend(),
                    "database client resolved via fallback"
                );
                return Ok(handle);
            }
            Ok(None) => "not configured".to_owned(),
            Err(e) => e.to_string(),
        };

        Err(InitError::Unavailable { primary, fallback })
    }

    /// Resolve, degrading to `None` (local-only mode) on any failure.
    ///
    /// The failure is logged, never returned.
    pub fn resolve_or_offline(&self) -> Option<DatabaseHandle> {
        match self.resolve() {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!(
                    error = %e,
                    "failed to initialize database client, email capture runs in local-only mode"
                );
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use realshare_storage::MemoryStore;

    use super::*;
    use crate::config::FirebaseConfig;

    /// Source that always fails and counts how often it was asked.
    #[derive(Default)]
    struct BrokenSource {
        calls: AtomicUsize,
    }

    impl ClientSource for BrokenSource {
        fn describe(&self) -> &'static str {
            "broken"
        }

        fn acquire(&self) -> Result<Option<DatabaseHandle>, InitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(InitError::InvalidConfig {
                reason: "simulated failure".to_owned(),
            })
        }
    }

    fn memory_source() -> Arc<dyn ClientSource> {
        Arc::new(FixedClient::new(Some(DatabaseHandle::new(Arc::new(MemoryStore::new())))))
    }

    fn empty_source() -> Arc<dyn ClientSource> {
        Arc::new(FixedClient::new(None))
    }

    #[test]
    fn primary_handle_wins_without_touching_fallback() {
        let fallback = Arc::new(BrokenSource::default());
        let resolver =
            Resolver::new(memory_source(), Arc::clone(&fallback) as Arc<dyn ClientSource>);

        let handle = resolver.resolve().unwrap();
        assert_eq!(handle.backend(), "memory");
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_primary_falls_back() {
        let resolver = Resolver::new(empty_source(), memory_source());
        assert_eq!(resolver.resolve().unwrap().backend(), "memory");
    }

    #[test]
    fn failing_primary_falls_back() {
        let resolver = Resolver::new(Arc::new(BrokenSource::default()), memory_source());
        assert!(resolver.resolve().is_ok());
    }

    #[test]
    fn both_failing_reports_both_reasons() {
        let resolver = Resolver::new(
            Arc::new(BrokenSource::default()),
            Arc::new(BrokenSource::default()),
        );
        match resolver.resolve() {
            Err(InitError::Unavailable { primary, fallback }) => {
                assert!(primary.contains("simulated failure"));
                assert!(fallback.contains("simulated failure"));
            }
            other => unreachable!("expected unavailable, got {other:?}"),
        }
    }

    #[test]
    fn both_failing_degrades_to_offline() {
        let resolver = Resolver::new(
            Arc::new(BrokenSource::default()),
            Arc::new(BrokenSource::default()),
        );
        assert!(resolver.resolve_or_offline().is_none());
    }

    #[test]
    fn nothing_configured_degrades_to_offline() {
        let resolver = Resolver::new(empty_source(), empty_source());
        assert!(resolver.resolve_or_offline().is_none());
    }

    #[test]
    fn configured_client_reports_missing_config_as_empty() {
        let source = ConfiguredClient::new(ConfigState::Missing, None);
        assert!(source.acquire().unwrap().is_none());
    }

    #[test]
    fn configured_client_rejects_invalid_config() {
        let source = ConfiguredClient::new(
            ConfigState::Invalid {
                reason: "expected value at line 1".to_owned(),
            },
            None,
        );
        assert!(matches!(source.acquire(), Err(InitError::InvalidConfig { .. })));
    }

    #[test]
    fn configured_client_rejects_incomplete_config() {
        let source = ConfiguredClient::new(ConfigState::Loaded(FirebaseConfig::default()), None);
        assert!(matches!(source.acquire(), Err(InitError::MissingField { .. })));
    }

    #[cfg(feature = "firestore")]
    #[test]
    fn configured_client_builds_firestore_handle() {
        let config = FirebaseConfig {
            api_key: "AIzaTest".to_owned(),
            project_id: "realshare-landing".to_owned(),
            app_id: "1:824584548370:web:a248233a546e2c8ed4a8cb".to_owned(),
            ..FirebaseConfig::default()
        };
        let source = ConfiguredClient::new(ConfigState::Loaded(config), None);
        let handle = source.acquire().unwrap().unwrap();
        assert_eq!(handle.backend(), "firestore");
    }

    #[test]
    fn default_project_client_ignores_blank_project() {
        let source = DefaultProjectClient::new(Some("   ".to_owned()), None);
        assert!(source.acquire().unwrap().is_none());
    }

    #[cfg(feature = "firestore")]
    #[test]
    fn default_project_client_rejects_malformed_project() {
        let source = DefaultProjectClient::new(Some("not/a/project".to_owned()), None);
        assert!(matches!(source.acquire(), Err(InitError::Backend(_))));
    }
}
