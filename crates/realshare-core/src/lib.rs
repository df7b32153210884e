//! Core library for `RealShare`.
//!
//! Contains the Firebase config, startup resolution of the database client,
//! the early-access email capture and its submission handler, and the
//! analytics client. This crate depends on `realshare-storage` for the
//! document store trait and knows nothing about HTTP or HTML.

pub mod analytics;
pub mod capture;
pub mod config;
pub mod error;
pub mod handle;
pub mod record;
pub mod resolver;
pub mod submission;
