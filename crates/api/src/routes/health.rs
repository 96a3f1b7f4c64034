//! Health, liveness and readiness probes.

use axum::Json;
use serde::Serialize;

const UP: &str = "UP";

#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub checks: Vec<HealthCheck>,
}

// Configuration is resolved before the router is built, so once a request
// reaches a handler the check can only be up.
fn readiness_checks() -> Vec<HealthCheck> {
    vec![HealthCheck {
        name: "configuration",
        status: UP,
    }]
}

/// GET /health — liveness and readiness combined.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: UP,
        checks: readiness_checks(),
    })
}

/// GET /health/live — the process is serving requests.
pub async fn live() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: UP,
        checks: Vec::new(),
    })
}

/// GET /health/ready
pub async fn ready() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: UP,
        checks: readiness_checks(),
    })
}
