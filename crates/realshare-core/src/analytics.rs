//! Google Analytics client for the landing page.
//!
//! Initialized once from the Firebase config and otherwise left alone: the
//! page embeds the gtag loader for the measurement id and that is all.

use tracing::{info, warn};

/// An initialized analytics client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analytics {
    measurement_id: String,
}

impl Analytics {
    /// Initialize analytics for `measurement_id`.
    ///
    /// Returns `None` when no id is configured or the id is malformed
    /// (anything other than `G-` followed by uppercase letters and digits).
    /// A bad id is logged and never fails startup.
    pub fn initialize(measurement_id: Option<&str>) -> Option<Self> {
        let id = measurement_id?.trim();
        if id.is_empty() {
            return None;
        }

        let well_formed = id
            .strip_prefix("G-")
            .is_some_and(|rest| {
                !rest.is_empty()
                    && rest
                        .chars()
                        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            });
        if !well_formed {
            warn!(measurement_id = id, "ignoring malformed analytics measurement id");
            return None;
        }

        info!(measurement_id = id, "analytics initialized");
        Some(Self {
            measurement_id: id.to_owned(),
        })
    }

    /// Measurement id this client reports to.
    #[must_use]
    pub fn measurement_id(&self) -> &str {
        &self.measurement_id
    }

    /// `<script>` tags that load gtag for this measurement id.
    #[must_use]
    pub fn head_snippet(&self) -> String {
        let id = &self.measurement_id;
        format!(
            "<script async src=\"https://www.googletagmanager.com/gtag/js?id={id}\"></script>\n\
             <script>window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}\
             gtag('js',new Date());gtag('config','{id}');</script>\n"
        )
    }
}
