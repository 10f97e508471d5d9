//! Shared application state.

use crate::config::ConfigV1;
use crate::metrics::PrometheusMetrics;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the metrics handle shares its registry between clones,
/// so the relayer can keep recording into the same value the server scrapes.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Relayer metrics registry rendered on every scrape.
    pub metrics: PrometheusMetrics,
}
