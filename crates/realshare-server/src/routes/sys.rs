//! System routes: `/v1/sys/*`

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Build the `/v1/sys` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

/// Response body for `GET /v1/sys/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the server answers; an offline database does not
    /// make the page unhealthy.
    pub status: &'static str,
    /// `connected` or `local_only`.
    pub database: &'static str,
    /// Backend name when a database is connected.
    pub backend: Option<&'static str>,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backend = state.submissions.database().map(|db| db.backend());
    Json(HealthResponse {
        status: "ok",
        database: if backend.is_some() { "connected" } else { "local_only" },
        backend,
    })
}
