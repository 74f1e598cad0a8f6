//! netcounter-api: Counter device HTTP contract
//!
//! Endpoint definitions and the raw counter value type shared by the client,
//! the device simulator, and the terminal shells.

pub mod endpoint;
pub mod value;

pub use endpoint::{Endpoint, HttpMethod};
pub use value::{CounterValue, ValueError};
