//! `RealShare` HTTP server.
//!
//! Wires together the core library, storage backend, and HTTP routes into a
//! running Axum server. Serves the landing page at `/`, the signup API at
//! `/v1/early-access`, and a health check at `/v1/sys/health`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
