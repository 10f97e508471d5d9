//! HTTP route definitions and handlers.
//!
//! Only two endpoints exist: the Prometheus scrape and a liveness check.

mod health_routes;
mod metrics;

use crate::state::AppState;
use axum::Router;

/// Content type of the Prometheus text exposition format.
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Creates the application router with all configured routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(metrics::routes())
        .merge(health_routes::routes())
        .with_state(state)
}
