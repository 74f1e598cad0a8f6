use std::time::Duration;

use axum::http::StatusCode;
use netcounter_client::{
    ClientError, CounterClient, CounterValue, Endpoint, HttpTransport, Operation, Status,
};
use netcounter_sim::{DeviceConfig, DeviceState};
use tokio::net::TcpListener;

/// Start a simulated device on an ephemeral port and return its address
async fn start_device(device: DeviceState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind simulator");
    let addr = listener.local_addr().expect("no local address");
    tokio::spawn(async move {
        let _ = netcounter_sim::serve(listener, device).await;
    });
    addr.to_string()
}

/// Address with nothing listening on it
async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

fn client() -> CounterClient {
    CounterClient::with_transport(
        HttpTransport::with_timeout(Duration::from_secs(2)).expect("failed to build transport"),
    )
}

#[tokio::test]
async fn test_refresh_reads_count() {
    let device = DeviceState::default();
    device.set(5);
    let address = start_device(device).await;
    let client = client();

    let value = client.refresh(&address).await.unwrap();

    assert_eq!(value, CounterValue::from("5"));
    assert_eq!(client.snapshot().status, Status::Updated);
}

#[tokio::test]
async fn test_increment_scenario() {
    let device = DeviceState::default();
    let address = start_device(device.clone()).await;
    let client = client();

    client.refresh(&address).await.unwrap();
    let state = client.snapshot();
    assert_eq!(state.value, Some(CounterValue::from("0")));
    assert_eq!(state.status.to_string(), "Updated");

    client.increment(&address).await.unwrap();
    let state = client.snapshot();
    assert_eq!(state.value, Some(CounterValue::from("1")));
    assert_eq!(state.status.to_string(), "Incremented");
    assert_ne!(state.value, Some(CounterValue::from("Added. New count: 1")));
    assert_eq!(device.hits(Endpoint::Add), 1);
    assert_eq!(device.hits(Endpoint::Count), 2);
}

#[tokio::test]
async fn test_decrement_observes_device_floor() {
    let device = DeviceState::default();
    let address = start_device(device).await;
    let client = client();

    let value = client.decrement(&address).await.unwrap();

    assert_eq!(value.parse(), Ok(0));
    assert_eq!(client.snapshot().status, Status::Decremented);
}

#[tokio::test]
async fn test_decrement_below_zero_when_device_allows() {
    let device = DeviceState::new(DeviceConfig {
        min: -100,
        ..DeviceConfig::default()
    });
    let address = start_device(device).await;
    let client = client();

    let value = client.decrement(&address).await.unwrap();

    assert_eq!(value.parse(), Ok(-1));
}

#[tokio::test]
async fn test_unreachable_device_keeps_value() {
    let device = DeviceState::default();
    device.set(3);
    let live = start_device(device).await;
    let dead = dead_address().await;
    let client = client();
    client.refresh(&live).await.unwrap();

    let err = client.refresh(&dead).await.unwrap_err();

    assert!(matches!(err, ClientError::Http(_)));
    let state = client.snapshot();
    assert_eq!(state.value, Some(CounterValue::from("3")));
    assert_eq!(state.address, dead);
    match state.status {
        Status::Error(message) => assert!(message.starts_with("HTTP request failed")),
        other => panic!("expected error status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_sub_skips_confirmation_read() {
    let device = DeviceState::default();
    device.set(2);
    let address = start_device(device.clone()).await;
    let client = client();
    client.refresh(&address).await.unwrap();
    device.fail(Endpoint::Sub, StatusCode::INTERNAL_SERVER_ERROR);

    let err = client.decrement(&address).await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    assert_eq!(client.snapshot().value, Some(CounterValue::from("2")));
    assert_eq!(
        client.snapshot().status,
        Status::Error("device returned 500 Internal Server Error".to_string())
    );
    assert_eq!(device.hits(Endpoint::Count), 1);
    assert_eq!(device.get(), 2);
}

#[tokio::test]
async fn test_add_applied_but_count_unavailable() {
    let device = DeviceState::default();
    device.set(4);
    let address = start_device(device.clone()).await;
    let client = client();
    client.refresh(&address).await.unwrap();
    device.fail(Endpoint::Count, StatusCode::SERVICE_UNAVAILABLE);

    let err = client.increment(&address).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Confirmation {
            operation: Operation::Increment,
            ..
        }
    ));
    // The device moved on, the display did not
    assert_eq!(device.get(), 5);
    assert_eq!(client.snapshot().value, Some(CounterValue::from("4")));
    assert!(client.snapshot().status.to_string().contains("503"));

    device.heal(Endpoint::Count);
    assert_eq!(client.refresh(&address).await.unwrap().as_str(), "5");
}

#[tokio::test]
async fn test_repeated_refresh_does_not_accumulate() {
    let device = DeviceState::default();
    device.set(11);
    let address = start_device(device).await;
    let client = client();

    for _ in 0..5 {
        assert_eq!(client.refresh(&address).await.unwrap().as_str(), "11");
    }
}

#[tokio::test]
async fn test_invalid_address_is_reported() {
    let client = client();

    let err = client.refresh("https://secure.device").await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidAddress { .. }));
    assert!(client.snapshot().status.is_error());
    assert!(client.snapshot().value.is_none());
}

#[tokio::test]
async fn test_custom_reqwest_client() {
    let device = DeviceState::default();
    device.set(7);
    let address = start_device(device.clone()).await;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .user_agent("netcounter-test")
        .build()
        .unwrap();
    let client = CounterClient::with_transport(HttpTransport::with_client(http));

    let value = client.decrement(&address).await.unwrap();

    assert_eq!(value, CounterValue::from("6"));
    assert_eq!(device.hits(Endpoint::Sub), 1);
    assert_eq!(client.snapshot().status, Status::Decremented);
}
