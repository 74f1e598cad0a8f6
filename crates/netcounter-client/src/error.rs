//! Error types for the netcounter client

use netcounter_api::ValueError;
use thiserror::Error;

use crate::state::Operation;

/// Errors that can occur when talking to a counter device
#[derive(Error, Debug)]
pub enum ClientError {
    /// Address could not be turned into a plain `http://` URL
    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress {
        /// Address as supplied by the user
        address: String,
        /// Why it was rejected
        reason: String,
    },

    /// HTTP request failed (unreachable, refused, reset, timed out)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Device answered with a non-success status
    #[error("device returned {status} {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Status text
        reason: String,
    },

    /// Payload could not be interpreted as a counter value
    #[error("invalid response: {0}")]
    Protocol(#[from] ValueError),

    /// Mutation was applied but the confirmation read failed
    #[error("{operation} applied but confirmation read failed")]
    Confirmation {
        /// Mutating operation that succeeded
        operation: Operation,
        /// Failure of the follow-up read
        #[source]
        source: Box<ClientError>,
    },

    /// Rejected because another operation is still in flight
    #[error("another operation is already in flight")]
    Busy,
}

impl ClientError {
    /// Whether the device could not be reached or refused the request
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddress { .. } | Self::Http(_) | Self::Status { .. }
        )
    }

    /// Human-readable description including every underlying cause
    #[must_use]
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            // reqwest repeats its inner error in its own message
            if !message.ends_with(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
