//! Firebase web app configuration.
//!
//! The fixed set of connection parameters handed out by the Firebase console
//! for a web app. The database client and the analytics client are both
//! built from it.

use serde::Deserialize;

use crate::error::InitError;

/// Connection parameters for the Firebase project behind the landing page.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    /// Web API key.
    pub api_key: String,
    /// Auth domain (e.g. `realshare-landing.firebaseapp.com`).
    #[serde(default)]
    pub auth_domain: String,
    /// Project id (e.g. `realshare-landing`).
    pub project_id: String,
    /// Default storage bucket.
    #[serde(default)]
    pub storage_bucket: String,
    /// Cloud messaging sender id.
    #[serde(default)]
    pub messaging_sender_id: String,
    /// Web app id.
    pub app_id: String,
    /// Analytics measurement id (`G-XXXXXXX`), optional.
    #[serde(default)]
    pub measurement_id: Option<String>,
}

impl FirebaseConfig {
    /// Check that the fields needed to reach the database are present.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::MissingField`] naming the first blank required
    /// field.
    pub fn validate(&self) -> Result<(), InitError> {
        let required = [
            ("projectId", &self.project_id),
            ("apiKey", &self.api_key),
            ("appId", &self.app_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(InitError::MissingField { field });
            }
        }
        Ok(())
    }
}

/// Outcome of loading the Firebase config at startup.
///
/// Loading never fails hard; a broken config is carried to the resolver,
/// which logs it and moves on to the fallback client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigState {
    /// No Firebase config was supplied.
    Missing,
    /// Config parsed; not yet validated.
    Loaded(FirebaseConfig),
    /// Config was supplied but could not be parsed.
    Invalid { reason: String },
}

impl ConfigState {
    /// Measurement id of a loaded config, if any.
    #[must_use]
    pub fn measurement_id(&self) -> Option<&str> {
        match self {
            Self::Loaded(config) => config.measurement_id.as_deref(),
            Self::Missing | Self::Invalid { .. } => None,
        }
    }
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("api_key", &"[redacted]")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .field("measurement_id", &self.measurement_id)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> FirebaseConfig {
        FirebaseConfig {
            api_key: "AIzaTest".to_owned(),
            auth_domain: "realshare-landing.firebaseapp.com".to_owned(),
            project_id: "realshare-landing".to_owned(),
            storage_bucket: "realshare-landing.firebasestorage.app".to_owned(),
            messaging_sender_id: "824584548370".to_owned(),
            app_id: "1:824584548370:web:a248233a546e2c8ed4a8cb".to_owned(),
            measurement_id: Some("G-2054F2YTQ0".to_owned()),
        }
    }

    #[test]
    fn complete_config_validates() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn blank_project_id_is_reported() {
        let config = FirebaseConfig {
            project_id: "  ".to_owned(),
            ..sample()
        };
        match config.validate() {
            Err(InitError::MissingField { field }) => assert_eq!(field, "projectId"),
            other => unreachable!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn parses_console_snippet_json() {
        let config: FirebaseConfig = serde_json::from_str(
            r#"{
                "apiKey": "AIzaTest",
                "authDomain": "realshare-landing.firebaseapp.com",
                "projectId": "realshare-landing",
                "storageBucket": "realshare-landing.firebasestorage.app",
                "messagingSenderId": "824584548370",
                "appId": "1:824584548370:web:a248233a546e2c8ed4a8cb"
            }"#,
        )
        .unwrap();
        assert_eq!(config.project_id, "realshare-landing");
        assert_eq!(config.measurement_id, None);
    }

    #[test]
    fn debug_hides_api_key() {
        assert!(!format!("{:?}", sample()).contains("AIzaTest"));
    }
}
