use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use axum::Router;
use figment::providers::{Format, Yaml};
use figment::Figment;
use serde_json::Value;

use taskotron::auth::TokenService;
use taskotron::config::{Config, ConfigV1};
use taskotron::routes::create_router;
use taskotron::state::AppState;
use taskotron::store::create_store;

// A single pooled connection keeps the in-memory database alive and shared
// for the whole test.
pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
store:
  type: "sqlite"
  uri: "sqlite::memory:"
  max_connections: 1
bind_address: "127.0.0.1:5001"
environment: "test"
jwt:
  iss: "taskotron-test"
  exp: 86400
  secret: "integration-test-secret"
logging:
  level: "debug"
  format: "console"
"#;

pub fn load_test_config() -> ConfigV1 {
    let config: Config = Figment::new()
        .merge(Yaml::string(TEST_CONFIG))
        .extract()
        .expect("Failed to parse test config YAML");

    match config {
        Config::ConfigV1(cfg) => cfg,
    }
}

pub async fn build_app() -> (Router, Arc<ConfigV1>) {
    let config = Arc::new(load_test_config());
    let store = create_store(&config.store).await;
    let tokens = Arc::new(TokenService::new(&config.jwt));

    let state = AppState {
        config: config.clone(),
        tokens,
        store,
    };

    (create_router(state), config)
}

pub fn json_request(path: &str, method: Method, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn authed_request(path: &str, method: Method, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn authed_json_request(
    path: &str,
    method: Method,
    token: &str,
    body: Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
