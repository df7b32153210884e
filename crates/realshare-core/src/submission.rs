//! Early-access form submission.
//!
//! [`SubmissionHandler::submit`] turns one form submit into at most one
//! database write and exactly one user-facing [`Acknowledgment`] (or none,
//! for an empty field). Errors end here: they are logged and shown to the
//! user as a generic retry-later message, never returned.
//!
//! In-flight submissions are not de-duplicated; two quick submits of the
//! same address produce two writes.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::capture::EmailCapture;
use crate::handle::DatabaseHandle;
use crate::record::{EARLY_ACCESS_COLLECTION, EarlyAccessRecord};

/// What the user is told after a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgment {
    /// The signup was written to the database.
    Saved,
    /// No database is available; nothing was persisted.
    LocalOnly,
    /// The write failed; the user should try again.
    Failed,
}

impl Acknowledgment {
    /// Text shown to the user.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Saved => "Thanks — we'll keep you updated.",
            Self::LocalOnly => "Thanks — we'll keep you updated. (local only)",
            Self::Failed => "Something went wrong. Please try again later.",
        }
    }

    /// Whether the email field is cleared after this outcome.
    #[must_use]
    pub fn clears_field(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Handles early-access form submits against an optional database.
#[derive(Debug, Clone)]
pub struct SubmissionHandler {
    db: Option<DatabaseHandle>,
}

impl SubmissionHandler {
    /// Handler writing through `db`, or local-only when `None`.
    #[must_use]
    pub fn new(db: Option<DatabaseHandle>) -> Self {
        Self { db }
    }

    /// The injected database handle, if any.
    #[must_use]
    pub fn database(&self) -> Option<&DatabaseHandle> {
        self.db.as_ref()
    }

    /// Submit the captured email.
    ///
    /// Returns `None` for an empty field (nothing happens). Otherwise the
    /// field is cleared on [`Acknowledgment::Saved`] and
    /// [`Acknowledgment::LocalOnly`] and left untouched on
    /// [`Acknowledgment::Failed`] so the user can resubmit.
    pub async fn submit(&self, capture: &mut EmailCapture) -> Option<Acknowledgment> {
        if capture.is_empty() {
            return None;
        }

        let ack = match &self.db {
            None => {
                warn!("database client is not initialized, email not saved");
                Acknowledgment::LocalOnly
            }
            Some(db) => {
                let record = EarlyAccessRecord::new(capture.email());
                match db.add(EARLY_ACCESS_COLLECTION, record.into_fields()).await {
                    Ok(document_id) => {
                        info!(%document_id, backend = db.backend(), "early access signup saved");
                        Acknowledgment::Saved
                    }
                    Err(e) => {
                        error!(
                            error = %e,
                            backend = db.backend(),
                            "failed to save early access signup"
                        );
                        Acknowledgment::Failed
                    }
                }
            }
        };

        if ack.clears_field() {
            capture.clear();
        }
        Some(ack)
    }
}
