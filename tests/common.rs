use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use relayer_metrics::config::{extract_config, ConfigV1};
use relayer_metrics::metrics::PrometheusMetrics;
use relayer_metrics::routes::create_router;
use relayer_metrics::startup::build_state;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:0
logging:
  level: "debug"
  format: "json"
"#;

pub fn load_test_config() -> ConfigV1 {
    extract_config(Figment::new().merge(Yaml::string(TEST_CONFIG)))
        .expect("Failed to parse test config YAML")
}

/// Builds the router together with a metrics handle that records into the
/// same registry the router scrapes.
pub fn build_app() -> (Router, PrometheusMetrics) {
    let state = build_state(Arc::new(load_test_config())).expect("metrics should register");
    let metrics = state.metrics.clone();
    (create_router(state), metrics)
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// Finds the sample line for `name` carrying every `label="value"` pair.
pub fn sample_line<'a>(text: &'a str, name: &str, labels: &[(&str, &str)]) -> Option<&'a str> {
    text.lines().find(|line| {
        line.starts_with(&format!("{}{{", name))
            && labels
                .iter()
                .all(|(k, v)| line.contains(&format!("{}=\"{}\"", k, v)))
    })
}

/// Parses the value at the end of a sample line.
pub fn sample_value(line: &str) -> f64 {
    line.rsplit(' ')
        .next()
        .and_then(|v| v.parse().ok())
        .expect("sample line should end with a number")
}
