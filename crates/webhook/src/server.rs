//! Webhook protocol surface
//!
//! The host orchestrator drives the solver over a small JSON protocol:
//! `POST /present` and `POST /cleanup` each carry one challenge request
//! and answer with a success/error body. Transport-level status is 200
//! either way; solver failures travel in the body.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::solver::{ChallengeRequest, ChallengeSolver};

/// Response body for present/cleanup calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChallengeResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
        }
    }
}

/// Build the webhook router around a solver.
pub fn webhook_router(solver: Arc<dyn ChallengeSolver>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/present", post(present))
        .route("/cleanup", post(cleanup))
        .layer(TraceLayer::new_for_http())
        .with_state(solver)
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn present(
    State(solver): State<Arc<dyn ChallengeSolver>>,
    Json(challenge): Json<ChallengeRequest>,
) -> impl IntoResponse {
    match solver.present(&challenge).await {
        Ok(()) => Json(ChallengeResponse::ok()),
        Err(e) => {
            error!(fqdn = %challenge.resolved_fqdn, error = %e, "present failed");
            Json(ChallengeResponse::failed(format!(
                "failed to present challenge: {}",
                e
            )))
        }
    }
}

async fn cleanup(
    State(solver): State<Arc<dyn ChallengeSolver>>,
    Json(challenge): Json<ChallengeRequest>,
) -> impl IntoResponse {
    match solver.cleanup(&challenge).await {
        Ok(()) => Json(ChallengeResponse::ok()),
        Err(e) => {
            error!(fqdn = %challenge.resolved_fqdn, error = %e, "cleanup failed");
            Json(ChallengeResponse::failed(format!(
                "failed to clean up challenge: {}",
                e
            )))
        }
    }
}
