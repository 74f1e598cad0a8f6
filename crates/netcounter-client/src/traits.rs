//! Transport seam between the counter logic and the network

use async_trait::async_trait;
use netcounter_api::Endpoint;

use crate::error::Result;

/// Issues a single request against a counter device
///
/// Implementations return the response body on a 2xx answer and an error
/// for anything else. They must not retry.
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    async fn fetch(&self, address: &str, endpoint: Endpoint) -> Result<String>;
}
