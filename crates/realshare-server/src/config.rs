//! Server configuration for `RealShare`.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Nothing here fails: a broken Firebase config is carried along as
//! [`ConfigState::Invalid`] so the page still comes up in local-only mode.

use std::net::SocketAddr;

use realshare_core::config::{ConfigState, FirebaseConfig};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Where signups are written.
    pub storage: StorageMode,
    /// Firebase web app config (primary database client).
    pub firebase: ConfigState,
    /// Ambient project id for the fallback database client.
    pub default_project: Option<String>,
    /// Firestore endpoint override (emulator).
    pub firestore_endpoint: Option<String>,
}

/// Supported storage modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Firestore, resolved from the Firebase config or the default project.
    Firestore,
    /// In-memory (development only, data lost on restart).
    Memory,
    /// No database; every signup is acknowledged as local only.
    Disabled,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `REALSHARE_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8080`)
    /// - `REALSHARE_LOG_LEVEL` — log filter (default: `info`)
    /// - `REALSHARE_STORAGE` — `firestore`, `memory`, or `none` (default: `firestore`)
    /// - `REALSHARE_FIREBASE_CONFIG` — Firebase console config as JSON
    /// - `REALSHARE_FIREBASE_API_KEY`, `_AUTH_DOMAIN`, `_PROJECT_ID`,
    ///   `_STORAGE_BUCKET`, `_MESSAGING_SENDER_ID`, `_APP_ID`,
    ///   `_MEASUREMENT_ID` — individual config fields (ignored when the JSON
    ///   form is set)
    /// - `GOOGLE_CLOUD_PROJECT` — project for the fallback client
    /// - `FIRESTORE_EMULATOR_HOST` — `host:port` of a Firestore emulator
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Priority: REALSHARE_BIND_ADDR > PORT > default 127.0.0.1:8080
        let bind_addr = if let Some(addr) = lookup("REALSHARE_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080)))
        } else if let Some(port_str) = lookup("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8080);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8080))
        };

        let log_level = lookup("REALSHARE_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let storage = match lookup("REALSHARE_STORAGE")
            .unwrap_or_else(|| "firestore".to_owned())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageMode::Memory,
            "none" | "disabled" | "off" => StorageMode::Disabled,
            _ => StorageMode::Firestore,
        };

        let firestore_endpoint = lookup("FIRESTORE_EMULATOR_HOST")
            .filter(|host| !host.is_empty())
            .map(|host| {
                if host.starts_with("http://") || host.starts_with("https://") {
                    host
                } else {
                    format!("http://{host}")
                }
            });

        Self {
            bind_addr,
            log_level,
            storage,
            firebase: load_firebase(&lookup),
            default_project: lookup("GOOGLE_CLOUD_PROJECT"),
            firestore_endpoint,
        }
    }
}

fn load_firebase(lookup: &impl Fn(&str) -> Option<String>) -> ConfigState {
    if let Some(json) = lookup("REALSHARE_FIREBASE_CONFIG") {
        return match serde_json::from_str::<FirebaseConfig>(&json) {
            Ok(config) => ConfigState::Loaded(config),
            Err(e) => ConfigState::Invalid {
                reason: format!("REALSHARE_FIREBASE_CONFIG is not valid JSON config: {e}"),
            },
        };
    }

    let field = |name: &str| lookup(&format!("REALSHARE_FIREBASE_{name}"));
    let api_key = field("API_KEY");
    let project_id = field("PROJECT_ID");
    let app_id = field("APP_ID");
    if api_key.is_none() && project_id.is_none() && app_id.is_none() {
        return ConfigState::Missing;
    }

    ConfigState::Loaded(FirebaseConfig {
        api_key: api_key.unwrap_or_default(),
        auth_domain: field("AUTH_DOMAIN").unwrap_or_default(),
        project_id: project_id.unwrap_or_default(),
        storage_bucket: field("STORAGE_BUCKET").unwrap_or_default(),
        messaging_sender_id: field("MESSAGING_SENDER_ID").unwrap_or_default(),
        app_id: app_id.unwrap_or_default(),
        measurement_id: field("MEASUREMENT_ID"),
    })
}
