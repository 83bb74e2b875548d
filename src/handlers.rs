use axum::{Json, extract::State};
use serde::Serialize;

use crate::config::{AppConfig, Env};

/// HealthResponse
///
/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub env: Env,
}

/// health
///
/// [Public Route] Liveness probe for load balancers. Never gated.
pub async fn health(State(config): State<AppConfig>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        env: config.env,
    })
}
