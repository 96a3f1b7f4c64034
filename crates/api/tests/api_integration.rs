//! Integration tests for the greeting service router.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use greeting_api::config::{Config, GreetingConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    setup_with(GreetingConfig::default())
}

fn setup_with(greeting: GreetingConfig) -> axum::Router {
    let state = greeting_api::create_state(greeting);
    greeting_api::create_app(state, get_metrics_handle())
}

async fn get(app: axum::Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn content_type(response: &Response) -> &str {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_hello_endpoint() {
    let response = get(setup(), "/greeting").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/plain"));

    let body = body_string(response).await;
    assert!(body.contains("Hello"));
    assert_eq!(body, "Hello from Quarkus!");
}

#[tokio::test]
async fn test_info_endpoint() {
    let response = get(setup(), "/greeting/info").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/json");

    let body = body_string(response).await;
    assert!(body.contains("quarkus-demo"));

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["name"], "quarkus-demo");
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["environment"], "unknown");
    assert_eq!(json["greeting"], "Hello from Quarkus!");
}

#[tokio::test]
async fn test_greeting_override() {
    let app = setup_with(GreetingConfig::new("Hi there", "staging"));

    let response = get(app.clone(), "/greeting").await;
    assert_eq!(body_string(response).await, "Hi there");

    let response = get(app, "/greeting/info").await;
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["greeting"], "Hi there");
    assert_eq!(json["environment"], "staging");
    assert_eq!(json["name"], "quarkus-demo");
    assert_eq!(json["version"], "1.0.0");
}

#[tokio::test]
async fn test_override_resolved_from_lookup() {
    let config = Config::from_lookup(|key| match key {
        "GREETING_MESSAGE" => Some("Hi there".to_string()),
        _ => None,
    });
    let app = setup_with(config.greeting);

    let response = get(app, "/greeting").await;
    assert_eq!(body_string(response).await, "Hi there");
}

#[tokio::test]
async fn test_responses_are_idempotent() {
    let app = setup_with(GreetingConfig::new("Same", "prod"));

    let first = body_string(get(app.clone(), "/greeting").await).await;
    let second = body_string(get(app.clone(), "/greeting").await).await;
    assert_eq!(first, second);

    let first = body_string(get(app.clone(), "/greeting/info").await).await;
    let second = body_string(get(app, "/greeting/info").await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_requests_share_config() {
    let app = setup_with(GreetingConfig::new("Shared", "prod"));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { body_string(get(app, "/greeting").await).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), "Shared");
    }
}

#[tokio::test]
async fn test_health_probes() {
    for uri in ["/health", "/health/live", "/health/ready"] {
        let response = get(setup(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");

        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "UP", "{uri}");
        assert!(json["checks"].is_array(), "{uri}");
    }
}

#[tokio::test]
async fn test_readiness_reports_configuration() {
    let response = get(setup(), "/health/ready").await;
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();

    assert_eq!(json["checks"][0]["name"], "configuration");
    assert_eq!(json["checks"][0]["status"], "UP");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let response = get(setup(), "/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/plain"));
}

#[tokio::test]
async fn test_unknown_path_returns_json_404() {
    let response = get(setup(), "/greeting/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(json["error"].as_str().unwrap().contains("/greeting/nope"));
}
