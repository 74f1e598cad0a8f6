//! netcounter-sim: simulated counter device
//!
//! Serves the same `/count`, `/add` and `/sub` contract as the physical
//! device so the client and the terminal shells can be exercised without
//! hardware.

pub mod config;
pub mod device;
pub mod router;

pub use config::{DeviceConfig, ServerConfig, SimConfig};
pub use device::DeviceState;
pub use router::create_router;

use tokio::net::TcpListener;

/// Serve the device on an already bound listener until the task is dropped
///
/// # Errors
/// Returns an error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener, device: DeviceState) -> std::io::Result<()> {
    axum::serve(listener, create_router(device)).await
}
