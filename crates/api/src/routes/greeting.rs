//! Greeting resource: plain-text greeting and JSON application info.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::config::GreetingConfig;

/// Application name reported by `GET /greeting/info`.
pub const APP_NAME: &str = "quarkus-demo";
/// Application version reported by `GET /greeting/info`.
pub const APP_VERSION: &str = "1.0.0";

/// Shared application state accessible from all handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub greeting: GreetingConfig,
}

impl AppState {
    pub fn new(greeting: GreetingConfig) -> Self {
        Self { greeting }
    }
}

// -- Response types --

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub greeting: String,
}

impl AppInfo {
    /// Snapshot of the constants plus the resolved configuration.
    pub fn from_config(config: &GreetingConfig) -> Self {
        Self {
            name: APP_NAME.to_string(),
            version: APP_VERSION.to_string(),
            environment: config.environment().to_string(),
            greeting: config.message().to_string(),
        }
    }
}

// -- Handlers --

/// GET /greeting — returns the configured greeting as plain text.
#[tracing::instrument(skip(state))]
pub async fn hello(State(state): State<Arc<AppState>>) -> String {
    metrics::counter!("greeting_requests_total", "endpoint" => "greeting").increment(1);
    state.greeting.message().to_string()
}

/// GET /greeting/info — returns name, version, environment and greeting.
#[tracing::instrument(skip(state))]
pub async fn info(State(state): State<Arc<AppState>>) -> Json<AppInfo> {
    metrics::counter!("greeting_requests_total", "endpoint" => "info").increment(1);
    Json(AppInfo::from_config(&state.greeting))
}
