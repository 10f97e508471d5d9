//! Metrics collection and exposition for Prometheus.
//!
//! Relayer subsystems record observations through [`MetricsRecorder`]; the
//! scrape endpoint renders the shared registry held by [`PrometheusMetrics`].

mod catalog;
mod recorder;

pub use catalog::{
    InstrumentKind, InstrumentSpec, RegisteredInstrument, BLOCK_QUERY_FAILURES,
    BLOCK_QUERY_FAILURE_LABELS, CATALOG, CHAIN_LATEST_HEIGHT, CLIENT_EXPIRATION,
    CLIENT_EXPIRATION_LABELS, FEES_SPENT, HEIGHT_LABELS, IBC_HEADER_FAILURE, OBSERVED_PACKETS,
    PACKET_LABELS, RELAYED_PACKETS, RPC_CLIENT_FAILURE, WALLET_BALANCE, WALLET_LABELS,
};
pub use recorder::{MetricsRecorder, PrometheusMetrics};
