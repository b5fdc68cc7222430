//! E2E tests for the advisory version check

use std::time::Duration;

use ota_client::{Error, Timeouts};

use super::common::{self, MockDevice, Reply};

#[tokio::test]
async fn test_version_plain_text() {
    let dev = MockDevice::start(vec![("GET", "/version", Reply::ok("v1.2.0"))]).await;

    let version = dev.client().version().await.expect("Version check failed");
    assert_eq!(version.to_string(), "v1.2.0");

    let reqs = dev.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].method, "GET");
    assert_eq!(reqs[0].path, "/version");
}

#[tokio::test]
async fn test_version_json() {
    let dev = MockDevice::start(vec![(
        "GET",
        "/version",
        Reply::ok(r#"{"version":"1.0.0","idf_version":"v5.3.1"}"#),
    )])
    .await;

    let version = dev.client().version().await.expect("Version check failed");
    assert_eq!(version.firmware(), "1.0.0");
    assert_eq!(version.idf(), Some("v5.3.1"));
}

#[tokio::test]
async fn test_version_not_found() {
    // Old firmware without the endpoint
    let dev = MockDevice::start(vec![]).await;

    let err = dev.client().version().await.unwrap_err();
    let (status, _) = err.http_status().expect("Expected an HTTP error");
    assert_eq!(status.as_u16(), 404);
}

#[tokio::test]
async fn test_version_unreachable() {
    let client = ota_client::OtaClient::new(
        ota_client::Device::with_port("127.0.0.1", common::refused_port()).unwrap(),
    )
    .unwrap();

    assert!(matches!(
        client.version().await,
        Err(Error::Connection { .. })
    ));
}

#[tokio::test]
async fn test_version_timeout() {
    let dev = MockDevice::start(vec![(
        "GET",
        "/version",
        Reply::ok("v1.2.0").delayed(Duration::from_secs(3)),
    )])
    .await;

    let client =
        dev.client_with(Timeouts::default().update_version(Duration::from_millis(200)));

    match client.version().await {
        Err(Error::Timeout(t)) => assert_eq!(t, Duration::from_millis(200)),
        other => panic!("Expected timeout, got {other:?}"),
    }
}
