//! HTTP router for the simulated device

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use netcounter_api::Endpoint;
use tracing::{debug, info, warn};

use crate::device::DeviceState;

/// Create the device router
pub fn create_router(state: DeviceState) -> Router {
    Endpoint::ALL
        .into_iter()
        .fold(Router::new(), |router, endpoint| {
            let handler = match endpoint {
                Endpoint::Count => get(count),
                Endpoint::Add => post(add),
                Endpoint::Sub => post(sub),
            };
            router.route(endpoint.path(), handler)
        })
        .with_state(state)
}

async fn count(State(device): State<DeviceState>) -> Response {
    respond(&device, Endpoint::Count, |device| device.get().to_string())
}

async fn add(State(device): State<DeviceState>) -> Response {
    respond(&device, Endpoint::Add, |device| {
        format!("Added. New count: {}", device.add())
    })
}

async fn sub(State(device): State<DeviceState>) -> Response {
    respond(&device, Endpoint::Sub, |device| {
        format!("Subtracted. New count: {}", device.sub())
    })
}

fn respond(
    device: &DeviceState,
    endpoint: Endpoint,
    handle: impl FnOnce(&DeviceState) -> String,
) -> Response {
    device.record_hit(endpoint);
    let cors = [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")];

    if let Some(status) = device.fault(endpoint) {
        warn!(%endpoint, status = status.as_u16(), "injected failure");
        let body = status.canonical_reason().unwrap_or("error");
        return (status, cors, body).into_response();
    }

    let body = handle(device);
    if endpoint.is_mutation() {
        info!(%endpoint, %body, "counter changed");
    } else {
        debug!(%endpoint, %body, "counter read");
    }
    (StatusCode::OK, cors, body).into_response()
}
