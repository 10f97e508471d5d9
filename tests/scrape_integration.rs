mod common;

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use relayer_metrics::metrics::{
    MetricsRecorder, CATALOG, IBC_HEADER_FAILURE, RPC_CLIENT_FAILURE,
};
use relayer_metrics::routes::METRICS_CONTENT_TYPE;
use tower::ServiceExt;

use common::{body_text, build_app, get, sample_line, sample_value};

#[tokio::test]
async fn health_check_answers_ok() {
    let (app, _metrics) = build_app();

    let response = app
        .oneshot(get("/health"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn scrape_uses_prometheus_text_format() {
    let (app, metrics) = build_app();
    metrics.set_latest_height("osmosis-1", 1);

    let response = app
        .oneshot(get("/metrics"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(CONTENT_TYPE)
            .expect("content type missing")
            .to_str()
            .expect("content type not valid UTF-8"),
        METRICS_CONTENT_TYPE
    );
}

#[tokio::test]
async fn scrape_before_any_observation_is_empty() {
    let (app, metrics) = build_app();

    let response = app
        .oneshot(get("/metrics"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.is_empty());
    assert_eq!(metrics.catalog().len(), 7);
}

#[tokio::test]
async fn scrape_reflects_relayer_observations() {
    let (app, metrics) = build_app();

    metrics.observe_packets("path-ab", "chainA", "channel-0", "transfer", "recv_packet", 3);
    metrics.observe_packets("path-ab", "chainA", "channel-0", "transfer", "recv_packet", 2);
    for _ in 0..4 {
        metrics.inc_packets_relayed("path-ab", "chainB", "channel-1", "transfer", "acknowledge_packet");
    }
    metrics.set_latest_height("osmosis-1", 12345);
    metrics.set_latest_height("osmosis-1", 12400);
    metrics.set_wallet_balance("cosmoshub-4", "0.025uatom", "relayer", "cosmos1xyz", "uatom", 1_000_000.0);
    metrics.set_fees_spent("cosmoshub-4", "0.025uatom", "relayer", "cosmos1xyz", "uatom", 250.0);
    metrics.inc_block_query_failure("chainA", RPC_CLIENT_FAILURE);
    metrics.inc_block_query_failure("chainA", RPC_CLIENT_FAILURE);
    metrics.inc_block_query_failure("chainA", IBC_HEADER_FAILURE);
    metrics.set_client_expiration(
        "path-ab",
        "chainA",
        "07-tendermint-0",
        "336h0m0s",
        Duration::from_secs(60 * 60),
    );

    let response = app
        .oneshot(get("/metrics"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;

    for spec in CATALOG.iter() {
        assert!(
            text.contains(&format!("# HELP {} ", spec.name)),
            "{} missing from scrape",
            spec.name
        );
    }

    let observed = sample_line(
        &text,
        "cosmos_relayer_observed_packets",
        &[
            ("path", "path-ab"),
            ("chain", "chainA"),
            ("channel", "channel-0"),
            ("port", "transfer"),
            ("type", "recv_packet"),
        ],
    )
    .expect("observed packets series");
    assert_eq!(sample_value(observed), 5.0);

    let relayed = sample_line(
        &text,
        "cosmos_relayer_relayed_packets",
        &[("chain", "chainB"), ("type", "acknowledge_packet")],
    )
    .expect("relayed packets series");
    assert_eq!(sample_value(relayed), 4.0);
    assert_eq!(
        text.lines()
            .filter(|l| l.starts_with("cosmos_relayer_relayed_packets{"))
            .count(),
        1
    );

    let height = sample_line(
        &text,
        "cosmos_relayer_chain_latest_height",
        &[("chain", "osmosis-1")],
    )
    .expect("height series");
    assert_eq!(sample_value(height), 12400.0);

    let wallet = [
        ("chain", "cosmoshub-4"),
        ("gas_price", "0.025uatom"),
        ("key", "relayer"),
        ("address", "cosmos1xyz"),
        ("denom", "uatom"),
    ];
    let balance = sample_line(&text, "cosmos_relayer_wallet_balance", &wallet)
        .expect("wallet balance series");
    assert_eq!(sample_value(balance), 1_000_000.0);
    let fees = sample_line(&text, "cosmos_relayer_fees_spent", &wallet).expect("fees series");
    assert_eq!(sample_value(fees), 250.0);

    let rpc = sample_line(
        &text,
        "cosmos_relayer_block_query_errors_total",
        &[("chain", "chainA"), ("type", "RPC Client")],
    )
    .expect("rpc failure series");
    assert_eq!(sample_value(rpc), 2.0);
    let header = sample_line(
        &text,
        "cosmos_relayer_block_query_errors_total",
        &[("chain", "chainA"), ("type", "IBC Header")],
    )
    .expect("header failure series");
    assert_eq!(sample_value(header), 1.0);

    let expiration = sample_line(
        &text,
        "cosmos_relayer_client_expiration_seconds",
        &[
            ("path_name", "path-ab"),
            ("client_id", "07-tendermint-0"),
            ("trusting_period", "336h0m0s"),
        ],
    )
    .expect("client expiration series");
    assert_eq!(sample_value(expiration), 3600.0);
}

#[tokio::test]
async fn recordings_between_scrapes_show_up_in_the_next_one() {
    let (app, metrics) = build_app();

    metrics.inc_block_query_failure("chainA", RPC_CLIENT_FAILURE);
    let first = body_text(
        app.clone()
            .oneshot(get("/metrics"))
            .await
            .expect("request should succeed"),
    )
    .await;

    metrics.inc_block_query_failure("chainA", RPC_CLIENT_FAILURE);
    let second = body_text(
        app.oneshot(get("/metrics"))
            .await
            .expect("request should succeed"),
    )
    .await;

    let labels = [("chain", "chainA"), ("type", "RPC Client")];
    let name = "cosmos_relayer_block_query_errors_total";
    assert_eq!(sample_value(sample_line(&first, name, &labels).expect("series")), 1.0);
    assert_eq!(sample_value(sample_line(&second, name, &labels).expect("series")), 2.0);
}
