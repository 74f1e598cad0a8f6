//! HTTP transport for counter devices

use std::net::Ipv6Addr;
use std::time::Duration;

use async_trait::async_trait;
use netcounter_api::{Endpoint, HttpMethod};
use reqwest::{Client, Method};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{ClientError, Result};
use crate::traits::DeviceTransport;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Plain-HTTP transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with [`DEFAULT_TIMEOUT`]
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport whose requests give up after `timeout`
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Create a transport with a custom `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Build the request URL for `endpoint` on the device at `address`
    ///
    /// `address` is a host with an optional port. An explicit `http://`
    /// prefix is accepted; any other scheme is rejected. IPv6 hosts take a
    /// port only in bracketed form (`[::1]:8080`); a bare `::1` is bracketed
    /// here.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidAddress`] when no URL can be formed.
    pub fn url(address: &str, endpoint: Endpoint) -> Result<Url> {
        let trimmed = address.trim().trim_end_matches('/');
        let invalid = |reason: String| ClientError::InvalidAddress {
            address: address.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("address is empty".to_string()));
        }

        let base = if trimmed.contains("://") {
            Url::parse(trimmed)
        } else if trimmed.parse::<Ipv6Addr>().is_ok() {
            Url::parse(&format!("http://[{trimmed}]"))
        } else {
            Url::parse(&format!("http://{trimmed}"))
        }
        .map_err(|e| invalid(e.to_string()))?;

        if base.scheme() != "http" {
            return Err(invalid(format!(
                "unsupported scheme {:?}, only plain http is supported",
                base.scheme()
            )));
        }

        base.join(endpoint.path())
            .map_err(|e| invalid(e.to_string()))
    }

    #[instrument(skip(self), level = "debug")]
    async fn send(&self, address: &str, endpoint: Endpoint) -> Result<String> {
        let url = Self::url(address, endpoint)?;
        let method = match endpoint.method() {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let response = self.client.request(method, url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "device rejected request");
            return Err(ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        debug!(%body, "device responded");
        Ok(body)
    }
}

#[async_trait]
impl DeviceTransport for HttpTransport {
    async fn fetch(&self, address: &str, endpoint: Endpoint) -> Result<String> {
        self.send(address, endpoint).await
    }
}
