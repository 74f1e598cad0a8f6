//! netcounter-client: remote control for a networked counter device
//!
//! [`CounterClient`] turns three intents (refresh, increment, decrement) into
//! HTTP calls against a device exposing `/count`, `/add` and `/sub`, and keeps
//! an observable [`CounterState`] (address, last value, status) in sync with
//! every outcome.
//!
//! # Examples
//!
//! ```no_run
//! use netcounter_client::{CounterClient, Status};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CounterClient::new()?;
//! let mut updates = client.subscribe();
//!
//! client.refresh("192.168.0.223").await?;
//! assert_eq!(client.snapshot().status, Status::Updated);
//!
//! // Mutations are confirmed with a fresh read of `/count`
//! match client.increment("192.168.0.223").await {
//!     Ok(value) => println!("counter is now {value}"),
//!     Err(_) => println!("{}", client.snapshot().status),
//! }
//!
//! // A hosting UI can await transitions instead of polling
//! updates.changed().await?;
//! println!("{}", updates.borrow().status);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod counter;
pub mod error;
pub mod http;
pub mod state;
pub mod traits;

pub use config::{ClientConfig, ConfigError};
pub use counter::{CounterClient, OverlapPolicy};
pub use error::{ClientError, Result};
pub use http::HttpTransport;
pub use netcounter_api::{CounterValue, Endpoint};
pub use state::{CounterState, Operation, Status};
pub use traits::DeviceTransport;
