//! HTTP route handlers for `RealShare`.
//!
//! Routes are organized by surface:
//! - `landing`: the landing page and its early-access form (`/`)
//! - `early_access`: JSON signup API (`/v1/early-access`)
//! - `sys`: health check (`/v1/sys/health`)

pub mod early_access;
pub mod landing;
pub mod sys;

use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Maximum number of signup API requests handled at once.
const SIGNUP_CONCURRENCY_LIMIT: usize = 64;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    // The JSON API may be called from a statically hosted copy of the page.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = early_access::router()
        .layer(tower::limit::ConcurrencyLimitLayer::new(SIGNUP_CONCURRENCY_LIMIT))
        .layer(cors);

    Router::new()
        .merge(landing::router())
        .merge(api_routes)
        .nest("/v1/sys", sys::router())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}
