//! Metrics recording implementation using Prometheus.

use prometheus::core::Collector;
use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Duration;

use super::catalog::{
    InstrumentKind, InstrumentSpec, RegisteredInstrument, BLOCK_QUERY_FAILURES,
    CHAIN_LATEST_HEIGHT, CLIENT_EXPIRATION, FEES_SPENT, OBSERVED_PACKETS, RELAYED_PACKETS,
    WALLET_BALANCE,
};

/// Trait for recording relayer observations.
///
/// Label values are positional and must follow the schema declared for the
/// instrument in [`super::catalog`]. None of the methods can fail.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Adds `count` packets observed on a path/channel for the given event type.
    fn observe_packets(
        &self,
        path: &str,
        chain: &str,
        channel: &str,
        port: &str,
        event_type: &str,
        count: u64,
    );

    /// Counts one successfully relayed packet.
    fn inc_packets_relayed(
        &self,
        path: &str,
        chain: &str,
        channel: &str,
        port: &str,
        event_type: &str,
    );

    /// Records the most recently observed block height of a chain.
    fn set_latest_height(&self, chain: &str, height: i64);

    /// Records the current wallet balance in `denom`.
    fn set_wallet_balance(
        &self,
        chain: &str,
        gas_price: &str,
        key: &str,
        address: &str,
        denom: &str,
        balance: f64,
    );

    /// Records the cumulative fees paid from the wallet.
    ///
    /// This is a gauge: the caller keeps the running total and reports it
    /// here, nothing is accumulated on this side.
    fn set_fees_spent(
        &self,
        chain: &str,
        gas_price: &str,
        key: &str,
        address: &str,
        denom: &str,
        amount: f64,
    );

    /// Records the time left before a light client expires, in fractional seconds.
    fn set_client_expiration(
        &self,
        path_name: &str,
        chain: &str,
        client_id: &str,
        trusting_period: &str,
        time_to_expiration: Duration,
    );

    /// Counts one failed block query.
    ///
    /// `failure_type` is conventionally [`super::RPC_CLIENT_FAILURE`] or
    /// [`super::IBC_HEADER_FAILURE`], but any value is accepted.
    fn inc_block_query_failure(&self, chain: &str, failure_type: &str);
}

/// Prometheus metrics collector for the relayer.
///
/// Cloning is cheap and every clone records into the same series.
#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Arc<Registry>,

    // Packet flow
    observed_packets: CounterVec,
    relayed_packets: CounterVec,

    // Chain tracking
    chain_latest_height: GaugeVec,
    block_query_failures: CounterVec,

    // Wallet accounting
    wallet_balance: GaugeVec,
    fees_spent: GaugeVec,

    // Light clients
    client_expiration: GaugeVec,
}

fn register_counter(spec: &InstrumentSpec, registry: &Registry) -> prometheus::Result<CounterVec> {
    debug_assert_eq!(spec.kind, InstrumentKind::Counter);
    let counter = CounterVec::new(Opts::new(spec.name, spec.help), spec.labels)?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}

fn register_gauge(spec: &InstrumentSpec, registry: &Registry) -> prometheus::Result<GaugeVec> {
    debug_assert_eq!(spec.kind, InstrumentKind::Gauge);
    let gauge = GaugeVec::new(Opts::new(spec.name, spec.help), spec.labels)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

impl PrometheusMetrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    ///
    /// # Panics
    ///
    /// Panics if an instrument cannot be registered. The catalog is fixed, so
    /// this only happens on a programming error and should abort startup.
    pub fn new() -> Self {
        Self::try_new().expect("Failed to register relayer metrics")
    }

    /// Creates a new metrics instance, returning the registration error
    /// instead of panicking.
    pub fn try_new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let observed_packets = register_counter(&OBSERVED_PACKETS, &registry)?;
        let relayed_packets = register_counter(&RELAYED_PACKETS, &registry)?;
        let chain_latest_height = register_gauge(&CHAIN_LATEST_HEIGHT, &registry)?;
        let block_query_failures = register_counter(&BLOCK_QUERY_FAILURES, &registry)?;
        let wallet_balance = register_gauge(&WALLET_BALANCE, &registry)?;
        let fees_spent = register_gauge(&FEES_SPENT, &registry)?;
        let client_expiration = register_gauge(&CLIENT_EXPIRATION, &registry)?;

        Ok(PrometheusMetrics {
            registry,
            observed_packets,
            relayed_packets,
            chain_latest_height,
            block_query_failures,
            wallet_balance,
            fees_spent,
            client_expiration,
        })
    }

    /// The registry every instrument is registered against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Lists the registered instruments in catalog order, as described by
    /// their collectors.
    pub fn catalog(&self) -> Vec<RegisteredInstrument> {
        let collectors: [(&dyn Collector, InstrumentKind); 7] = [
            (&self.observed_packets, InstrumentKind::Counter),
            (&self.relayed_packets, InstrumentKind::Counter),
            (&self.chain_latest_height, InstrumentKind::Gauge),
            (&self.wallet_balance, InstrumentKind::Gauge),
            (&self.fees_spent, InstrumentKind::Gauge),
            (&self.block_query_failures, InstrumentKind::Counter),
            (&self.client_expiration, InstrumentKind::Gauge),
        ];

        collectors
            .iter()
            .flat_map(|&(collector, kind)| {
                collector.desc().into_iter().map(move |desc| RegisteredInstrument {
                    name: desc.fq_name.clone(),
                    help: desc.help.clone(),
                    kind,
                    labels: desc.variable_labels.clone(),
                })
            })
            .collect()
    }

    /// Renders all metrics in Prometheus text format (version 0.0.4).
    ///
    /// Instruments without any series are left out of the output.
    pub fn render(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for PrometheusMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder for PrometheusMetrics {
    fn observe_packets(
        &self,
        path: &str,
        chain: &str,
        channel: &str,
        port: &str,
        event_type: &str,
        count: u64,
    ) {
        self.observed_packets
            .with_label_values(&[path, chain, channel, port, event_type])
            .inc_by(count as f64);
    }

    fn inc_packets_relayed(
        &self,
        path: &str,
        chain: &str,
        channel: &str,
        port: &str,
        event_type: &str,
    ) {
        self.relayed_packets
            .with_label_values(&[path, chain, channel, port, event_type])
            .inc();
    }

    fn set_latest_height(&self, chain: &str, height: i64) {
        self.chain_latest_height
            .with_label_values(&[chain])
            .set(height as f64);
    }

    fn set_wallet_balance(
        &self,
        chain: &str,
        gas_price: &str,
        key: &str,
        address: &str,
        denom: &str,
        balance: f64,
    ) {
        self.wallet_balance
            .with_label_values(&[chain, gas_price, key, address, denom])
            .set(balance);
    }

    fn set_fees_spent(
        &self,
        chain: &str,
        gas_price: &str,
        key: &str,
        address: &str,
        denom: &str,
        amount: f64,
    ) {
        self.fees_spent
            .with_label_values(&[chain, gas_price, key, address, denom])
            .set(amount);
    }

    fn set_client_expiration(
        &self,
        path_name: &str,
        chain: &str,
        client_id: &str,
        trusting_period: &str,
        time_to_expiration: Duration,
    ) {
        self.client_expiration
            .with_label_values(&[path_name, chain, client_id, trusting_period])
            .set(time_to_expiration.as_secs_f64());
    }

    fn inc_block_query_failure(&self, chain: &str, failure_type: &str) {
        self.block_query_failures
            .with_label_values(&[chain, failure_type])
            .inc();
    }
}
