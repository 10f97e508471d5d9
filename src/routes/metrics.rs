//! Metrics exposition endpoint.

use crate::state::AppState;
use axum::{
    extract::State, http::header::CONTENT_TYPE, http::StatusCode, response::IntoResponse,
    routing::get, Router,
};
use tracing::{debug, error};

use super::METRICS_CONTENT_TYPE;

/// Creates the metrics route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Handler for the /metrics endpoint.
///
/// Returns all collected relayer metrics in Prometheus text format.
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.render() {
        Ok(metrics_text) => {
            debug!(bytes = metrics_text.len(), "Serving metrics scrape");
            (
                StatusCode::OK,
                [(CONTENT_TYPE, METRICS_CONTENT_TYPE)],
                metrics_text,
            )
        }
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("failed to encode metrics: {}", e),
            )
        }
    }
}
