#![allow(clippy::unwrap_used)]
// Integration tests for the update coordinator against a wiremock hub.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use haptique_core::{
    CoordinatorState, CoordinatorUpdate, CoreError, HubConfig, HubContext, SensorKind, SensorValue,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> HubConfig {
    let mut config = HubConfig::new(server.address().to_string());
    config.poll_interval = Duration::from_secs(3600);
    config
}

async fn mount_json(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// The first-cycle scenario: one RF command saved, no IR commands.
async fn mount_healthy_hub(server: &MockServer) {
    mount_json(
        server,
        "/api/status",
        json!({
            "hostname": "hub1",
            "version": "1.2",
            "wifi_status": 3,
            "ssid": "home",
            "rssi": -58,
            "local_ip": "192.168.1.100",
            "mac": "aa:bb:cc:dd:ee:ff",
            "gateway": "192.168.1.1",
            "ap_enabled": true
        }),
    )
    .await;
    mount_json(
        server,
        "/api/rf/status",
        json!({
            "rx_count": 5,
            "last_code": 5_592_405,
            "last_bits": 24,
            "last_protocol": 1,
            "rf_rx_pin": 13,
            "rf_tx_pin": 22
        }),
    )
    .await;
    mount_json(server, "/api/rf/saved", json!({ "commands": [{ "name": "tv-power" }] })).await;
    mount_json(server, "/api/ir/saved", json!({ "commands": [] })).await;
}

/// Every read answers with an empty object after `delay`.
async fn mount_slow_hub(server: &MockServer, delay: Duration) {
    for endpoint in ["/api/status", "/api/rf/status", "/api/rf/saved", "/api/ir/saved"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(delay),
            )
            .mount(server)
            .await;
    }
}

async fn hits(server: &MockServer, verb: &str, endpoint: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == endpoint)
        .count()
}

// ── First cycle ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_first_cycle_publishes_merged_snapshot() {
    let server = MockServer::start().await;
    mount_healthy_hub(&server).await;

    let ctx = HubContext::connect(config_for(&server)).await.unwrap();
    let coordinator = ctx.coordinator();
    let snap = coordinator.snapshot().unwrap();

    assert_eq!(snap.rx_count(), 5);
    assert_eq!(snap.rf_saved.len(), 1);
    assert_eq!(snap.rf_saved[0].name, "tv-power");
    assert!(snap.ir_saved.is_empty());
    assert_eq!(snap.status.hostname.as_deref(), Some("hub1"));
    assert_eq!(snap.status.local_ip.as_deref(), Some("192.168.1.100"));
    assert!(snap.status.ap_enabled);

    assert!(coordinator.last_update_success());
    assert_eq!(coordinator.consecutive_failures(), 0);
    assert_eq!(coordinator.state(), CoordinatorState::Idle);
    assert!(matches!(
        *coordinator.subscribe().borrow(),
        CoordinatorUpdate::Published { .. }
    ));
    assert_eq!(ctx.title(), "hub1");
}

#[tokio::test]
async fn test_missing_commands_field_yields_empty_lists() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/status", json!({})).await;
    mount_json(&server, "/api/rf/status", json!({})).await;
    mount_json(&server, "/api/rf/saved", json!({})).await;
    mount_json(&server, "/api/ir/saved", json!({})).await;

    let ctx = HubContext::connect(config_for(&server)).await.unwrap();
    let snap = ctx.snapshot().unwrap();

    assert!(snap.rf_saved.is_empty());
    assert!(snap.ir_saved.is_empty());
    assert_eq!(snap.rx_count(), 0);
    assert!(!snap.status.ap_enabled);
}

#[tokio::test]
async fn test_null_rf_fields_do_not_fail_the_cycle() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/status", json!({ "hostname": "hub1" })).await;
    mount_json(
        &server,
        "/api/rf/status",
        json!({ "rx_count": 5, "last_code": null, "rf_tx_pin": null }),
    )
    .await;
    mount_json(&server, "/api/rf/saved", json!({ "commands": null })).await;
    mount_json(&server, "/api/ir/saved", json!({ "commands": [] })).await;

    let ctx = HubContext::connect(config_for(&server)).await.unwrap();
    let snap = ctx.snapshot().unwrap();

    assert_eq!(snap.rx_count(), 5);
    assert_eq!(snap.rf_status.last_code, None);
    assert!(snap.rf_saved.is_empty());

    let rf_sensor = ctx
        .entities()
        .sensors
        .into_iter()
        .find(|s| s.kind() == SensorKind::RfReceivedCount)
        .unwrap();
    assert_eq!(rf_sensor.value(), Some(SensorValue::Count(5)));
    assert_eq!(rf_sensor.attributes().get("last_code"), Some(&json!(0)));
}

#[tokio::test]
async fn test_failed_first_cycle_aborts_connect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = HubContext::connect(config_for(&server)).await;

    assert!(matches!(result, Err(CoreError::Communication { .. })));
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn test_failed_cycle_keeps_previous_snapshot() {
    let server = MockServer::start().await;
    mount_healthy_hub(&server).await;

    let ctx = HubContext::connect(config_for(&server)).await.unwrap();
    let coordinator = ctx.coordinator().clone();
    let before = coordinator.snapshot().unwrap();

    server.reset().await;
    mount_json(&server, "/api/status", json!({ "hostname": "renamed" })).await;
    mount_json(&server, "/api/rf/status", json!({ "rx_count": 99 })).await;
    mount_json(&server, "/api/ir/saved", json!({ "commands": [] })).await;
    Mock::given(method("GET"))
        .and(path("/api/rf/saved"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = coordinator.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::Communication { .. }));

    let after = coordinator.snapshot().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.rx_count(), 5);
    assert!(!coordinator.last_update_success());
    assert_eq!(coordinator.consecutive_failures(), 1);

    match &*coordinator.subscribe().borrow() {
        CoordinatorUpdate::Failed {
            consecutive_failures,
            error,
        } => {
            assert_eq!(*consecutive_failures, 1);
            assert!(matches!(error, CoreError::Communication { .. }));
        }
        other => panic!("expected Failed update, got: {other:?}"),
    }

    // Adapters go unavailable but keep rendering the last known values.
    let entities = ctx.entities();
    let rf_count = entities
        .sensors
        .iter()
        .find(|s| s.kind() == SensorKind::RfReceivedCount)
        .unwrap();
    assert!(!rf_count.available());
    assert_eq!(rf_count.value(), Some(SensorValue::Count(5)));
}

#[tokio::test]
async fn test_rf_status_timeout_fails_cycle_without_partial_publish() {
    let server = MockServer::start().await;
    mount_healthy_hub(&server).await;

    let mut config = config_for(&server);
    config.timeout = Duration::from_millis(300);
    let ctx = HubContext::connect(config).await.unwrap();
    let coordinator = ctx.coordinator().clone();
    let before = coordinator.snapshot().unwrap();

    server.reset().await;
    mount_json(&server, "/api/status", json!({ "hostname": "other" })).await;
    mount_json(&server, "/api/rf/saved", json!({ "commands": [] })).await;
    mount_json(&server, "/api/ir/saved", json!({ "commands": [] })).await;
    Mock::given(method("GET"))
        .and(path("/api/rf/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "rx_count": 6 }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = coordinator.refresh().await.unwrap_err();

    match err {
        CoreError::Communication {
            ref url,
            ref reason,
            timed_out,
        } => {
            assert!(timed_out);
            assert!(url.ends_with("/api/rf/status"), "unexpected url: {url}");
            assert!(reason.contains("timed out"), "unexpected reason: {reason}");
        }
        other => panic!("expected Communication error, got: {other:?}"),
    }

    let after = coordinator.snapshot().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.status.hostname.as_deref(), Some("hub1"));
    assert_eq!(after.rf_saved.len(), 1);
}

#[tokio::test]
async fn test_recovery_resets_failure_counter() {
    let server = MockServer::start().await;
    mount_healthy_hub(&server).await;

    let ctx = HubContext::connect(config_for(&server)).await.unwrap();
    let coordinator = ctx.coordinator().clone();

    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    coordinator.refresh().await.unwrap_err();
    coordinator.refresh().await.unwrap_err();
    assert_eq!(coordinator.consecutive_failures(), 2);

    server.reset().await;
    mount_healthy_hub(&server).await;
    coordinator.refresh().await.unwrap();

    assert_eq!(coordinator.consecutive_failures(), 0);
    assert!(coordinator.last_update_success());
}

// ── Scheduling and lifecycle ────────────────────────────────────────

#[tokio::test]
async fn test_request_refresh_runs_cycle_in_background() {
    let server = MockServer::start().await;
    mount_healthy_hub(&server).await;

    let ctx = HubContext::setup(config_for(&server)).await.unwrap();
    let mut updates = ctx.coordinator().subscribe();

    ctx.coordinator().request_refresh();
    tokio::time::timeout(Duration::from_secs(5), updates.changed())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(hits(&server, "GET", "/api/status").await, 2);
    ctx.shutdown().await;
}

#[tokio::test]
async fn test_scheduled_polling_repeats_cycles() {
    let server = MockServer::start().await;
    mount_healthy_hub(&server).await;

    let mut config = config_for(&server);
    config.poll_interval = Duration::from_millis(100);
    let ctx = HubContext::setup(config).await.unwrap();
    let mut updates = ctx.coordinator().subscribe();

    for _ in 0..2 {
        tokio::time::timeout(Duration::from_secs(5), updates.changed())
            .await
            .unwrap()
            .unwrap();
    }

    assert!(hits(&server, "GET", "/api/rf/status").await >= 3);
    ctx.shutdown().await;
}

#[tokio::test]
async fn test_refresh_after_shutdown_is_disconnected() {
    let server = MockServer::start().await;
    mount_healthy_hub(&server).await;

    let ctx = HubContext::setup(config_for(&server)).await.unwrap();
    ctx.shutdown().await;
    ctx.shutdown().await;

    let result = ctx.coordinator().refresh().await;
    assert!(matches!(result, Err(CoreError::Disconnected)));
    assert!(ctx.coordinator().is_shut_down());
    // The last snapshot is still readable after teardown.
    assert!(ctx.snapshot().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_refreshes_run_one_after_another() {
    let server = MockServer::start().await;
    mount_slow_hub(&server, Duration::from_millis(300)).await;

    let ctx = HubContext::new(config_for(&server)).unwrap();
    let coordinator = ctx.coordinator();

    let started = std::time::Instant::now();
    let (first, second) = tokio::join!(coordinator.refresh(), coordinator.refresh());
    let elapsed = started.elapsed();

    let first = first.unwrap();
    let second = second.unwrap();
    assert!(
        elapsed >= Duration::from_millis(600),
        "cycles overlapped: both finished after {elapsed:?}"
    );
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(hits(&server, "GET", "/api/status").await, 2);
    assert_eq!(coordinator.consecutive_failures(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shutdown_abandons_in_flight_cycle() {
    let server = MockServer::start().await;
    mount_healthy_hub(&server).await;

    let mut config = config_for(&server);
    config.poll_interval = Duration::from_millis(100);
    let ctx = HubContext::setup(config).await.unwrap();

    // Scheduled cycles now hang on the hub well past the shutdown budget.
    server.reset().await;
    mount_slow_hub(&server, Duration::from_secs(5)).await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(ctx.coordinator().state(), CoordinatorState::Polling);
    let before = ctx.snapshot().unwrap();

    let started = std::time::Instant::now();
    ctx.shutdown().await;
    let elapsed = started.elapsed();

    assert!(
        elapsed < Duration::from_secs(1),
        "shutdown blocked for {elapsed:?}"
    );
    assert!(ctx.coordinator().is_shut_down());
    assert!(Arc::ptr_eq(&before, &ctx.snapshot().unwrap()));
}
