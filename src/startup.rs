//! Application startup and server initialization.
//!
//! Builds the metrics registry, wires it into the router and serves scrapes
//! on the configured address.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::metrics::PrometheusMetrics;
use crate::routes;
use crate::state::AppState;

/// Builds the shared state for a configuration.
///
/// # Errors
///
/// Returns the registration error if the instrument catalog cannot be
/// registered; startup must not continue in that case.
pub fn build_state(config: Arc<ConfigV1>) -> Result<AppState, prometheus::Error> {
    let metrics = PrometheusMetrics::try_new()?;
    info!(
        instruments = metrics.catalog().len(),
        "Registered relayer metrics"
    );
    Ok(AppState { config, metrics })
}

/// Initializes and runs the scrape server.
///
/// The returned future only completes on a server error. Relayer subsystems
/// that share the process record into `state.metrics` clones.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the specified address
/// or encounters a runtime error during execution.
pub async fn serve(state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let bind_address = state.config.bind_address.clone();
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&bind_address).await?;
    info!(bind_address = %bind_address, "Serving metrics on /metrics");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the state from `config` and serves it.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config)?;
    serve(state).await
}
