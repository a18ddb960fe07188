//! Tests for RegistryClient::register() and the heartbeat task.
//!
//! Uses wiremock for the reachable registry and a closed port for the
//! unreachable case.

use std::time::Duration;

use projman_registry_client::heartbeat::register_once;
use projman_registry_client::{
    Heartbeat, RegistryClient, RegistryConfig, RegistryError, ServiceRegistration,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(registry_url: &str) -> RegistryConfig {
    RegistryConfig {
        registry_url: registry_url.parse().unwrap(),
        service_host: "projman.test".into(),
        port: 9090,
        heartbeat_secs: 3600,
        timeout_secs: 5,
    }
}

async fn wait_for_requests(server: &MockServer, count: usize) {
    for _ in 0..100 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("registry never received {count} request(s)");
}

#[tokio::test]
async fn register_posts_payload_to_register_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/registry/register"))
        .and(body_partial_json(serde_json::json!({
            "serviceName": "projman-service",
            "endpoint": "http://projman.test:9090",
            "healthCheck": "http://projman.test:9090/health",
            "port": 9090,
            "metadata": { "type": "requirements-status-service" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("registered"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&format!("{}/api/registry", server.uri()));
    let client = RegistryClient::new(&config).unwrap();
    let body = client
        .register(&ServiceRegistration::projman(&config))
        .await
        .unwrap();
    assert_eq!(body, "registered");
}

#[tokio::test]
async fn non_success_status_is_rejected_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("registry down"))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let client = RegistryClient::new(&config).unwrap();
    let err = client
        .register(&ServiceRegistration::projman(&config))
        .await
        .unwrap_err();
    match err {
        RegistryError::Rejected { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "registry down");
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_registry_is_a_transport_error() {
    let config = config_for("http://127.0.0.1:1/api/registry");
    let client = RegistryClient::new(&config).unwrap();
    let registration = ServiceRegistration::projman(&config);

    let err = client.register(&registration).await.unwrap_err();
    assert!(matches!(err, RegistryError::Http { .. }), "got: {err:?}");
    assert!(!register_once(&client, &registration).await);
}

#[tokio::test]
async fn register_once_reports_acceptance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let client = RegistryClient::new(&config).unwrap();
    assert!(register_once(&client, &ServiceRegistration::projman(&config)).await);
}

#[tokio::test]
async fn heartbeat_registers_immediately_and_stops_on_shutdown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let client = RegistryClient::new(&config).unwrap();
    let heartbeat = Heartbeat::spawn(
        client,
        ServiceRegistration::projman(&config),
        Duration::from_secs(config.heartbeat_secs),
    );

    wait_for_requests(&server, 1).await;
    tokio::time::timeout(Duration::from_secs(5), heartbeat.shutdown())
        .await
        .expect("heartbeat did not stop");

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn heartbeat_repeats_on_interval() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let client = RegistryClient::new(&config).unwrap();
    let heartbeat = Heartbeat::spawn(
        client,
        ServiceRegistration::projman(&config),
        Duration::from_millis(50),
    );

    wait_for_requests(&server, 3).await;
    heartbeat.shutdown().await;
}

#[tokio::test]
async fn heartbeat_keeps_trying_after_rejections() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(503).set_body_string("registry down"))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let client = RegistryClient::new(&config).unwrap();
    let heartbeat = Heartbeat::spawn(
        client,
        ServiceRegistration::projman(&config),
        Duration::from_millis(20),
    );

    wait_for_requests(&server, 3).await;
    tokio::time::timeout(Duration::from_secs(5), heartbeat.shutdown())
        .await
        .expect("heartbeat did not stop after failures");

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.len() >= 3, "only {} attempt(s)", received.len());
}

#[tokio::test]
async fn heartbeat_survives_unreachable_registry() {
    let config = config_for("http://127.0.0.1:1");
    let client = RegistryClient::new(&config).unwrap();
    let heartbeat = Heartbeat::spawn(
        client,
        ServiceRegistration::projman(&config),
        Duration::from_millis(20),
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    tokio::time::timeout(Duration::from_secs(5), heartbeat.shutdown())
        .await
        .expect("heartbeat did not stop after failures");
}
