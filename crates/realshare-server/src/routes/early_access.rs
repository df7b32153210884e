//! Early-access signup API: `POST /v1/early-access`
//!
//! JSON counterpart of the landing page form for script-driven clients.
//! Same handler, same three outcomes, expressed as status codes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use realshare_core::capture::EmailCapture;
use realshare_core::submission::Acknowledgment;

use crate::error::AppError;
use crate::state::AppState;

/// Build the signup API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/v1/early-access", post(create_signup))
}

/// Request body for `POST /v1/early-access`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Address to sign up. Missing is treated as empty.
    #[serde(default)]
    pub email: String,
}

/// Response body for a signup that was accepted.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// `saved` or `local_only`.
    pub outcome: Acknowledgment,
    /// Text to show the user.
    pub message: &'static str,
}

/// `201` when saved, `202` when local only, `204` for an empty email, `503`
/// when the write failed.
async fn create_signup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let mut capture = EmailCapture::from_input(&request.email);

    let Some(ack) = state.submissions.submit(&mut capture).await else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let status = match ack {
        Acknowledgment::Saved => StatusCode::CREATED,
        Acknowledgment::LocalOnly => StatusCode::ACCEPTED,
        Acknowledgment::Failed => return Err(AppError::Unavailable(ack.message().to_owned())),
    };

    Ok((
        status,
        Json(SignupResponse {
            outcome: ack,
            message: ack.message(),
        }),
    )
        .into_response())
}
