//! The fixed catalog of relayer instruments.
//!
//! Names are part of the public contract: dashboards and alerts match on them
//! bit-exactly, so renaming one is a breaking change.

use serde::Serialize;

/// The kind of time series an instrument records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// Monotonically non-decreasing; observations add to the current value.
    Counter,
    /// Observations overwrite the current value.
    Gauge,
}

/// Static declaration of one instrument: name, help text, kind and label schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: InstrumentKind,
    /// Label names in the order recording calls supply their values.
    pub labels: &'static [&'static str],
}

pub const PACKET_LABELS: &[&str] = &["path", "chain", "channel", "port", "type"];
pub const HEIGHT_LABELS: &[&str] = &["chain"];
pub const WALLET_LABELS: &[&str] = &["chain", "gas_price", "key", "address", "denom"];
pub const BLOCK_QUERY_FAILURE_LABELS: &[&str] = &["chain", "type"];
pub const CLIENT_EXPIRATION_LABELS: &[&str] = &["path_name", "chain", "client_id", "trusting_period"];

/// Conventional `type` value for a failed RPC client block query.
///
/// The failure counter does not restrict its `type` label to this set.
pub const RPC_CLIENT_FAILURE: &str = "RPC Client";
/// Conventional `type` value for a failed IBC header query.
pub const IBC_HEADER_FAILURE: &str = "IBC Header";

pub const OBSERVED_PACKETS: InstrumentSpec = InstrumentSpec {
    name: "cosmos_relayer_observed_packets",
    help: "The total number of observed packets",
    kind: InstrumentKind::Counter,
    labels: PACKET_LABELS,
};

pub const RELAYED_PACKETS: InstrumentSpec = InstrumentSpec {
    name: "cosmos_relayer_relayed_packets",
    help: "The total number of relayed packets",
    kind: InstrumentKind::Counter,
    labels: PACKET_LABELS,
};

pub const CHAIN_LATEST_HEIGHT: InstrumentSpec = InstrumentSpec {
    name: "cosmos_relayer_chain_latest_height",
    help: "The current height of the chain",
    kind: InstrumentKind::Gauge,
    labels: HEIGHT_LABELS,
};

pub const WALLET_BALANCE: InstrumentSpec = InstrumentSpec {
    name: "cosmos_relayer_wallet_balance",
    help: "The current balance for the relayer's wallet",
    kind: InstrumentKind::Gauge,
    labels: WALLET_LABELS,
};

/// A gauge holding the latest cumulative amount reported by the caller.
pub const FEES_SPENT: InstrumentSpec = InstrumentSpec {
    name: "cosmos_relayer_fees_spent",
    help: "The amount of fees spent from the relayer's wallet",
    kind: InstrumentKind::Gauge,
    labels: WALLET_LABELS,
};

pub const BLOCK_QUERY_FAILURES: InstrumentSpec = InstrumentSpec {
    name: "cosmos_relayer_block_query_errors_total",
    help: "The total number of block query failures. The failures are separated into two catagories: 'RPC Client' and 'IBC Header'",
    kind: InstrumentKind::Counter,
    labels: BLOCK_QUERY_FAILURE_LABELS,
};

pub const CLIENT_EXPIRATION: InstrumentSpec = InstrumentSpec {
    name: "cosmos_relayer_client_expiration_seconds",
    help: "Seconds until the client expires",
    kind: InstrumentKind::Gauge,
    labels: CLIENT_EXPIRATION_LABELS,
};

/// Every instrument registered by [`crate::metrics::PrometheusMetrics`].
pub const CATALOG: [InstrumentSpec; 7] = [
    OBSERVED_PACKETS,
    RELAYED_PACKETS,
    CHAIN_LATEST_HEIGHT,
    WALLET_BALANCE,
    FEES_SPENT,
    BLOCK_QUERY_FAILURES,
    CLIENT_EXPIRATION,
];

/// An instrument as it was actually registered, read back from its collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredInstrument {
    pub name: String,
    pub help: String,
    pub kind: InstrumentKind,
    pub labels: Vec<String>,
}
