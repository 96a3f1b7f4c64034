//! HTTP greeting service.
//!
//! Serves a configurable plain-text greeting and a JSON info payload, with
//! health probes, structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::GreetingConfig;
use crate::routes::greeting::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/health/live", get(routes::health::live))
        .route("/health/ready", get(routes::health::ready))
        .route("/greeting", get(routes::greeting::hello))
        .route("/greeting/info", get(routes::greeting::info))
        .with_state(state)
        .merge(metrics_router)
        .fallback(error::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wraps the resolved greeting configuration into shared handler state.
pub fn create_state(greeting: GreetingConfig) -> Arc<AppState> {
    Arc::new(AppState::new(greeting))
}
