//! Counter orchestration: request sequencing and state transitions

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use netcounter_api::{CounterValue, Endpoint};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http::HttpTransport;
use crate::state::{CounterState, Operation, Status};
use crate::traits::DeviceTransport;

/// Behaviour when an operation is invoked while another is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Let overlapping calls run side by side
    #[default]
    Allow,
    /// Fail the new call with [`ClientError::Busy`]
    Reject,
}

/// Remote-control client for a single counter device
///
/// Every operation updates the held [`CounterState`] when it starts and when
/// it resolves. The value only ever changes on a successful `/count` read;
/// the bodies of `/add` and `/sub` are never interpreted.
///
/// # Example
/// ```no_run
/// use netcounter_client::CounterClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CounterClient::new()?;
/// let value = client.increment("192.168.0.223").await?;
/// println!("{value} ({})", client.snapshot().status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CounterClient<T = HttpTransport> {
    transport: T,
    state: watch::Sender<CounterState>,
    overlap: OverlapPolicy,
    in_flight: AtomicUsize,
}

impl CounterClient<HttpTransport> {
    /// Create a client using the default HTTP transport
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }

    /// Create a client from loaded settings
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = Self::with_transport(HttpTransport::with_timeout(config.timeout())?)
            .overlap_policy(config.overlap);
        if let Some(address) = &config.address {
            client.set_address(address);
        }
        Ok(client)
    }
}

impl<T: DeviceTransport> CounterClient<T> {
    /// Create a client on top of a custom transport
    pub fn with_transport(transport: T) -> Self {
        let (state, _) = watch::channel(CounterState::default());
        Self {
            transport,
            state,
            overlap: OverlapPolicy::default(),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Set the overlap policy
    #[must_use]
    pub fn overlap_policy(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> CounterState {
        self.state.borrow().clone()
    }

    /// Receive every state transition
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CounterState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn address(&self) -> String {
        self.state.borrow().address.clone()
    }

    pub fn set_address(&self, address: impl Into<String>) {
        let address = address.into();
        self.state.send_if_modified(|state| {
            if state.address == address {
                return false;
            }
            state.address = address;
            true
        });
    }

    /// Number of operations currently running
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Read the counter from `/count`
    ///
    /// On success the response body becomes the held value, unparsed.
    ///
    /// # Errors
    /// Returns a transport error when the device cannot be reached or does
    /// not answer 2xx. The held value is left untouched.
    pub async fn refresh(&self, address: &str) -> Result<CounterValue> {
        let _guard = self.enter()?;
        self.read(address).await
    }

    /// Ask the device to increment, then confirm with a fresh read
    ///
    /// # Errors
    /// Returns a transport error if `/add` fails (no read is attempted), or
    /// [`ClientError::Confirmation`] if `/add` succeeded but the read failed.
    pub async fn increment(&self, address: &str) -> Result<CounterValue> {
        let _guard = self.enter()?;
        self.mutate(address, Operation::Increment).await
    }

    /// Ask the device to decrement, then confirm with a fresh read
    ///
    /// Bounds are the device's business; no clamping happens here.
    ///
    /// # Errors
    /// Same as [`CounterClient::increment`], for `/sub`.
    pub async fn decrement(&self, address: &str) -> Result<CounterValue> {
        let _guard = self.enter()?;
        self.mutate(address, Operation::Decrement).await
    }

    /// Run any operation by name
    ///
    /// # Errors
    /// See the individual operations.
    pub async fn run(&self, operation: Operation, address: &str) -> Result<CounterValue> {
        match operation {
            Operation::Refresh => self.refresh(address).await,
            Operation::Increment => self.increment(address).await,
            Operation::Decrement => self.decrement(address).await,
        }
    }

    async fn read(&self, address: &str) -> Result<CounterValue> {
        self.begin(address, Status::Fetching);

        let body = match self.transport.fetch(address, Endpoint::Count).await {
            Ok(body) => body,
            Err(e) => return Err(self.fail(Operation::Refresh, e)),
        };

        let value = CounterValue::new(body);
        if let Err(e) = value.parse() {
            warn!(error = %e, "storing non-numeric counter payload as-is");
        }

        self.state.send_modify(|state| {
            state.value = Some(value.clone());
            state.status = Status::Updated;
            state.last_updated = Some(Utc::now());
        });
        info!(%address, %value, "counter refreshed");
        Ok(value)
    }

    async fn mutate(&self, address: &str, operation: Operation) -> Result<CounterValue> {
        self.begin(address, operation.in_progress());

        match self.transport.fetch(address, operation.endpoint()).await {
            Ok(body) => debug!(%body, "{operation} acknowledged, confirming"),
            Err(e) => return Err(self.fail(operation, e)),
        }

        // The follow-up read is only issued once the mutation has succeeded.
        match self.read(address).await {
            Ok(value) => {
                self.state
                    .send_modify(|state| state.status = operation.succeeded());
                info!(%address, %value, "{operation} confirmed");
                Ok(value)
            }
            Err(source) => Err(self.fail(
                operation,
                ClientError::Confirmation {
                    operation,
                    source: Box::new(source),
                },
            )),
        }
    }

    fn begin(&self, address: &str, status: Status) {
        self.state.send_modify(|state| {
            address.clone_into(&mut state.address);
            state.status = status;
        });
    }

    fn fail(&self, operation: Operation, error: ClientError) -> ClientError {
        let message = error.describe();
        warn!(%operation, error = %message, "operation failed");
        self.state
            .send_modify(|state| state.status = Status::Error(message));
        error
    }

    fn enter(&self) -> Result<InFlightGuard<'_>> {
        match self.overlap {
            OverlapPolicy::Allow => {
                self.in_flight.fetch_add(1, Ordering::AcqRel);
            }
            OverlapPolicy::Reject => {
                if self
                    .in_flight
                    .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
                    .is_err()
                {
                    debug!("rejecting overlapping operation");
                    return Err(ClientError::Busy);
                }
            }
        }
        Ok(InFlightGuard(&self.in_flight))
    }
}

/// Decrements the in-flight count when an operation settles
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
